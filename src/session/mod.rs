/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
/// Default headers and header merging
pub mod headers;
/// The HTTP session and its request methods
pub mod http;
/// Per-call request options
pub mod options;
/// Reply type returned by the request methods
pub mod response;
/// Chunked streaming of large downloads
pub mod stream;

pub use headers::{default_headers, header_map, merge_headers};
pub use http::Session;
pub use options::RequestOptions;
pub use response::Reply;
pub use stream::ChunkStream;
