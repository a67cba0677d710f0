//! Allocation-free number and timestamp encoders
//!
//! Each encoder renders into a caller-provided stack buffer and returns the
//! filled slice.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Buffer large enough for any `u64` in decimal
pub type DecBuf = [u8; 20];

/// Buffer large enough for any `u64` in `0x`-prefixed hex
pub type HexBuf = [u8; 18];

/// Length of `[YYYY-MM-DDThh:mm:ss.mmm] `
pub const TIMESTAMP_LEN: usize = 26;

/// Buffer for one rendered timestamp
pub type TimestampBuf = [u8; TIMESTAMP_LEN];

/// Decimal digits without leading zeros; zero renders as `0`.
pub fn encode_dec(mut value: u64, buf: &mut DecBuf) -> &[u8] {
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buf[start..]
}

/// Lower-case hex with a `0x` prefix and no leading zero nibbles; zero renders as `0x0`.
pub fn encode_hex(mut value: u64, buf: &mut HexBuf) -> &[u8] {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = DIGITS[(value & 0xF) as usize];
        value >>= 4;
        if value == 0 {
            break;
        }
    }
    start -= 2;
    buf[start] = b'0';
    buf[start + 1] = b'x';
    &buf[start..]
}

/// `[YYYY-MM-DDThh:mm:ss.mmm] ` in UTC, including the trailing space.
pub fn encode_timestamp<'a>(time: &DateTime<Utc>, buf: &'a mut TimestampBuf) -> &'a [u8] {
    // Leap seconds report 1000..=1999 ms.
    let millis = time.timestamp_subsec_millis().min(999);
    let year = time.year().clamp(0, 9999) as u32;

    let mut idx = 0;
    let mut push = |byte: u8| {
        buf[idx] = byte;
        idx += 1;
    };
    let digits = |value: u32, width: u32, push: &mut dyn FnMut(u8)| {
        for exp in (0..width).rev() {
            push(b'0' + (value / 10u32.pow(exp) % 10) as u8);
        }
    };

    push(b'[');
    digits(year, 4, &mut push);
    push(b'-');
    digits(time.month(), 2, &mut push);
    push(b'-');
    digits(time.day(), 2, &mut push);
    push(b'T');
    digits(time.hour(), 2, &mut push);
    push(b':');
    digits(time.minute(), 2, &mut push);
    push(b':');
    digits(time.second(), 2, &mut push);
    push(b'.');
    digits(millis, 3, &mut push);
    push(b']');
    push(b' ');

    &buf[..]
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn dec(value: u64) -> String {
        let mut buf = DecBuf::default();
        String::from_utf8(encode_dec(value, &mut buf).to_vec()).unwrap()
    }

    fn hex(value: u64) -> String {
        let mut buf = HexBuf::default();
        String::from_utf8(encode_hex(value, &mut buf).to_vec()).unwrap()
    }

    #[test]
    fn test_decimal() {
        assert_eq!(dec(0), "0");
        assert_eq!(dec(7), "7");
        assert_eq!(dec(1000), "1000");
        assert_eq!(dec(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(0), "0x0");
        assert_eq!(hex(0xf), "0xf");
        assert_eq!(hex(0x10), "0x10");
        assert_eq!(hex(0xDEAD_BEEF), "0xdeadbeef");
        assert_eq!(hex(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn test_timestamp_layout() {
        let time = Utc.with_ymd_and_hms(2025, 1, 15, 10, 45, 23).unwrap()
            + chrono::Duration::milliseconds(456);
        let mut buf = TimestampBuf::default();
        assert_eq!(
            encode_timestamp(&time, &mut buf),
            b"[2025-01-15T10:45:23.456] "
        );
    }

    #[test]
    fn test_timestamp_pads_small_fields() {
        let time = Utc.with_ymd_and_hms(987, 2, 3, 4, 5, 6).unwrap();
        let mut buf = TimestampBuf::default();
        assert_eq!(
            encode_timestamp(&time, &mut buf),
            b"[0987-02-03T04:05:06.000] "
        );
    }
}
