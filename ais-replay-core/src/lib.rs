//! # AIS Replay Core
//!
//! Platform-independent encoding and domain logic for replaying AIS
//! vessel traffic.
//!
//! This crate contains pure protocol and filtering logic with **zero
//! I/O dependencies**: no sockets, no files, no async runtime. The
//! `ais-replay` binary crate layers the CSV record source, the archive
//! downloader, the UDP transport and the replay scheduler on top.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ais-replay-core (platform-independent, no tokio deps)      │
//! │  ├── record/      (decoded position reports)                │
//! │  ├── status/      (navigational status vocabulary)          │
//! │  ├── protocol/    (type 1 packing, armor, AIVDM, GPRMC)     │
//! │  ├── filter/      (replay predicates, MMSI selections)      │
//! │  └── geo/         (haversine distances and bearings)        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!               ┌────────────┴────────────┐
//!               │  ais-replay             │
//!               │  (CSV source, UDP sink, │
//!               │   scheduler, CLI)       │
//!               └─────────────────────────┘
//! ```
//!
//! ## Example: Encoding a Position Report
//!
//! ```rust
//! use ais_replay_core::{encode, AisRecord, SentenceFormat};
//! use chrono::NaiveDate;
//!
//! let record = AisRecord {
//!     timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
//!         .unwrap()
//!         .and_hms_opt(10, 30, 45)
//!         .unwrap(),
//!     mmsi: 220382000,
//!     latitude: Some(55.1234),
//!     longitude: Some(-2.5678),
//!     navigational_status: Some("Under way using engine".to_string()),
//!     rate_of_turn: Some(0.0),
//!     speed_over_ground: Some(12.5),
//!     course_over_ground: Some(90.0),
//!     true_heading: Some(180),
//! };
//!
//! let sentence = encode(&record, SentenceFormat::Aivdm);
//! assert!(sentence.starts_with("!AIVDM,1,1,,A,"));
//! ```

pub mod filter;
pub mod geo;
pub mod protocol;
pub mod record;
pub mod status;

// Re-export commonly used types
pub use filter::{MmsiSelection, ReplayFilter};
pub use geo::Position;
pub use protocol::{checksum, encode, SentenceFormat};
pub use record::AisRecord;
pub use status::NavigationStatus;
