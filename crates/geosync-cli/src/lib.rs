//! geosync-cli
//! ===========
//!
//! Command-line interface for the `geosync-core` place name reconciler.
//!
//! This crate primarily provides a binary (`geosync`). The library target only
//! carries this overview so that the crate has a rendered documentation page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! geosync --help
//! geosync -g areas.json stats
//! geosync -g areas.json resolve "Нижний Новгород Нижегородская обл"
//! geosync -g areas.json reconcile cities.csv -o reconciled.csv
//! ```
//!
//! Overrides are read from a CSV with a `row_id,choice` header; an empty
//! choice or `-` clears the row, anything else must be a gazetteer name.
//!
//! With the `fetch` feature, `geosync fetch -o areas.json` downloads the
//! public area tree first.
//!
//! For programmatic access use the [`geosync-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
