//! Object storage provider clients.
//!
//! - [`YandexDiskClient`] - Yandex Disk REST API client

mod yandex_disk;

pub use yandex_disk::{DEFAULT_API_BASE, YandexDiskClient};
