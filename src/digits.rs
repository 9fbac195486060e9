//! Decimal encoding straight into caller-owned byte buffers.
//!
//! Nothing here allocates or null-terminates. Two digits are produced per division
//! by looking them up in a 100-entry pair table.

/// Enough room for any u64 in decimal.
pub const MAX_DIGITS: usize = 20;

const DIGITS: &[u8; 10] = b"0123456789";

const DDIGITS: &[u8; 200] = b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

/// Write exactly `width` digits of `value` into `buf[offset..offset + width]`.
///
/// Values shorter than `width` come out zero-padded, digits beyond `width` are dropped.
/// The caller must make sure the value fits (clock fields are always 0..=99) and that
/// `buf` is long enough.
#[inline]
pub fn write_fixed(buf: &mut [u8], offset: usize, width: usize, mut value: u64) {
    let mut j = offset + width;
    while j >= offset + 2 {
        let index = (value % 100) as usize * 2;
        value /= 100;
        buf[j - 1] = DDIGITS[index + 1];
        buf[j - 2] = DDIGITS[index];
        j -= 2;
    }
    if j > offset {
        buf[j - 1] = DIGITS[(value % 10) as usize];
    }
}

/// Write the minimal decimal form of `value` at `buf[offset..]`, return the count written.
#[inline]
pub fn write_var(buf: &mut [u8], offset: usize, mut value: u64) -> usize {
    let mut tmp = [0u8; MAX_DIGITS];
    let mut j = tmp.len();
    while value >= 100 {
        let index = (value % 100) as usize * 2;
        value /= 100;
        j -= 1;
        tmp[j] = DDIGITS[index + 1];
        j -= 1;
        tmp[j] = DDIGITS[index];
    }
    if value < 10 {
        j -= 1;
        tmp[j] = DIGITS[value as usize];
    } else {
        let index = value as usize * 2;
        j -= 1;
        tmp[j] = DDIGITS[index + 1];
        j -= 1;
        tmp[j] = DDIGITS[index];
    }
    let n = tmp.len() - j;
    buf[offset..offset + n].copy_from_slice(&tmp[j..]);
    n
}

/// Like [write_var] with a leading `-` for negative values.
#[inline]
pub fn write_i64(buf: &mut [u8], offset: usize, value: i64) -> usize {
    if value < 0 {
        buf[offset] = b'-';
        1 + write_var(buf, offset + 1, value.unsigned_abs())
    } else {
        write_var(buf, offset, value as u64)
    }
}
