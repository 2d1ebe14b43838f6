//! RLE encoder.

use crate::config::RleConfig;
use idoarc_core::Result;

/// Walk `symbols` in windows of `unit_size` and report each run.
///
/// `emit(count, window)` is called once per record. A run longer than
/// `cap_size` is reported as saturated records of `cap_size` followed by the
/// remainder. A repetition of the window is only recognized when a full
/// following window exists with at least one more symbol after it, so the
/// last full window of the input always starts its own record.
pub(crate) fn scan_runs<T: PartialEq>(
    symbols: &[T],
    config: &RleConfig,
    mut emit: impl FnMut(usize, &[T]),
) {
    let unit = config.unit_size;
    let len = symbols.len();
    let mut i = 0;

    while i < len {
        let window = &symbols[i..(i + unit).min(len)];

        let mut count = 1;
        while i + count * unit < len
            && len - (i + count * unit) > unit
            && window == &symbols[i + count * unit..i + (count + 1) * unit]
        {
            count += 1;
        }

        let total = count;
        while count > config.cap_size {
            emit(config.cap_size, window);
            count -= config.cap_size;
        }
        emit(count, window);

        i += unit * total;
    }
}

/// Zero-padded decimal run-length field.
fn count_field(count: usize, width: usize) -> String {
    format!("{:0width$}", count, width = width)
}

/// Encode raw bytes.
///
/// Each record is the zero-padded decimal run count followed by the window
/// bytes: `b"111222333"` with 3-byte windows becomes `b"011110122201333"`.
pub fn encode_bytes(data: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let width = config.count_width();

    let mut output = Vec::with_capacity(data.len() + width);
    let mut records = 0usize;
    scan_runs(data, config, |count, window| {
        output.extend_from_slice(count_field(count, width).as_bytes());
        output.extend_from_slice(window);
        records += 1;
    });

    log::trace!(
        "rle: encoded {} bytes into {} records ({} bytes)",
        data.len(),
        records,
        output.len()
    );
    Ok(output)
}

/// Encode text, treating each `char` as one symbol.
///
/// `"aaa111"` with 5-char windows and a cap of 99 becomes `"01aaa11011"`.
pub fn encode_text(text: &str, config: &RleConfig) -> Result<String> {
    config.validate()?;
    let width = config.count_width();
    let chars: Vec<char> = text.chars().collect();

    let mut output = String::with_capacity(text.len() + width);
    scan_runs(&chars, config, |count, window| {
        output.push_str(&count_field(count, width));
        output.extend(window);
    });

    log::trace!("rle: encoded {} chars into {} bytes", chars.len(), output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(symbols: &[u8], unit: usize, cap: usize) -> Vec<(usize, Vec<u8>)> {
        let mut out = Vec::new();
        scan_runs(symbols, &RleConfig::new(unit, cap), |count, window| {
            out.push((count, window.to_vec()));
        });
        out
    }

    #[test]
    fn test_encode_text_short_tail() {
        let encoded = encode_text("aaa111", &RleConfig::new(5, 99)).unwrap();
        assert_eq!(encoded, "01aaa11011");
    }

    #[test]
    fn test_encode_bytes_distinct_windows() {
        let encoded = encode_bytes(b"111222333", &RleConfig::new(3, 99)).unwrap();
        assert_eq!(
            encoded,
            vec![
                0x30, 0x31, 0x31, 0x31, 0x31, 0x30, 0x31, 0x32, 0x32, 0x32, 0x30, 0x31, 0x33,
                0x33, 0x33
            ]
        );
    }

    #[test]
    fn test_encode_text_sentence() {
        let encoded = encode_text(
            "a new text line which we could use to check",
            &RleConfig::new(3, 99),
        )
        .unwrap();
        assert_eq!(
            encoded,
            "01a n01ew 01tex01t l01ine01 wh01ich01 we01 co01uld01 us01e t01o c01hec01k"
        );
    }

    #[test]
    fn test_last_full_window_starts_own_record() {
        // Four equal symbols: the fourth has nothing after it and is not
        // folded into the run.
        assert_eq!(runs(b"aaaa", 1, 99), vec![(3, b"a".to_vec()), (1, b"a".to_vec())]);
    }

    #[test]
    fn test_saturated_runs() {
        // 12 repetitions recognized, cap 5: 5 + 5 + 2, then the final symbol
        let records = runs(&[7u8; 13], 1, 5);
        assert_eq!(
            records,
            vec![(5, vec![7]), (5, vec![7]), (2, vec![7]), (1, vec![7])]
        );

        let encoded = encode_bytes(&[7u8; 13], &RleConfig::new(1, 5)).unwrap();
        assert_eq!(encoded, vec![b'5', 7, b'5', 7, b'2', 7, b'1', 7]);
    }

    #[test]
    fn test_count_field_padding() {
        let encoded = encode_bytes(b"xy", &RleConfig::new(1, 1000)).unwrap();
        assert_eq!(encoded, b"0001x0001y".to_vec());
    }

    #[test]
    fn test_multibyte_chars() {
        let encoded = encode_text("ééééé", &RleConfig::new(1, 9)).unwrap();
        assert_eq!(encoded, "4é1é");
    }

    #[test]
    fn test_empty_input() {
        assert!(encode_bytes(b"", &RleConfig::DEFAULT).unwrap().is_empty());
        assert!(encode_text("", &RleConfig::DEFAULT).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(encode_bytes(b"abc", &RleConfig::new(0, 99)).is_err());
        assert!(encode_text("abc", &RleConfig::new(1, 0)).is_err());
    }
}
