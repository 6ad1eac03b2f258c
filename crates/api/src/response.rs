//! Response envelope.

use serde::Serialize;

/// `{ "data": ... }` wrapper used by every resource endpoint.
///
/// The auth endpoints return their token payload bare; everything else
/// goes through this so list and detail responses share one shape.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
