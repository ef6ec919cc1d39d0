//! Identifier generation
use super::application::TimeStamp;
use chrono::Utc;
use uuid7::uuid7;

pub const APPLICATION_ID_PREFIX: &str = "BR-";

const SUFFIX_LEN: u32 = 6;
const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Upper-case base-36 rendering of `value`.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();

    // only ASCII digits and letters were pushed
    String::from_utf8_lossy(&out).into_owned()
}

/// Construct a new application id: `BR-<millis base36>-<6 random base36>`.
///
/// The random part is drawn from the random bits of a fresh uuid7. No
/// collision check is made against stored applications.
pub fn new_application_id(now: &TimeStamp<Utc>) -> String {
    let millis = u64::try_from(now.to_datetime_utc().timestamp_millis()).unwrap_or_default();

    // bytes 8..16 of a uuid7 are variant bits plus random data
    let mut random = [0u8; 8];
    random.copy_from_slice(&uuid7().as_bytes()[8..]);
    let random = u64::from_be_bytes(random) % 36u64.pow(SUFFIX_LEN);

    format!(
        "{APPLICATION_ID_PREFIX}{}-{:0>width$}",
        to_base36(millis),
        to_base36(random),
        width = SUFFIX_LEN as usize
    )
}
