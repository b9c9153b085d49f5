#![doc = r#"
Client for the SWAN Computing Provider marketplace API.

Operation mapping:

| Client method | HTTP call | Failure classification |
| --- | --- | --- |
| `CpClient::get_all_cp_machines` | `GET {SWAN_API}/cp/machines` | HTTP → `SwanError::Http`, request → `SwanError::Request`, other → passthrough |
| `CpClient::get_computing_providers_list` | `POST {SWAN_API}/cp/providers` (form `region`) | HTTP → `SwanError::Http`, everything else → passthrough |
| `CpClient::get_cp_detail` | `GET {SWAN_API}/{cp_id}` | none; error statuses are returned with the body |

Implementation notes:
- Records are opaque `serde_json` maps; the client never reshapes them.
- The base URL lives in `SwanConfig` and is injected into the client.
- `CpTransport` is the seam for tests; `testing::MockTransport` scripts it in memory.
"#]

pub mod client;
pub mod config;
pub mod errors;
pub mod reqwest_transport;
pub mod testing;
pub mod transport;

pub use client::{CpClient, Record};
pub use config::{DEFAULT_SWAN_API, SWAN_API_ENV, SWAN_API_TIMEOUT_SECS_ENV, SwanConfig};
pub use errors::SwanError;
pub use reqwest_transport::ReqwestTransport;
pub use testing::MockTransport;
pub use transport::{CpTransport, TransportError, TransportResponse};
