//! Heading reconstruction from font sizes.
//!
//! Pass 1 feeds every page into a [`histogram::FontHistogram`] and picks
//! heading thresholds from it. Pass 2 classifies each text block and lets the
//! [`aggregate::Aggregator`] group body paragraphs under their heading path.

pub mod aggregate;
pub mod batch;
pub mod classify;
pub mod histogram;
pub mod thresholds;
