mod url;

pub use url::{CreateUrlRequest, UpdateUrlRequest, UrlRecord, UrlResponse, UrlStatsResponse};
