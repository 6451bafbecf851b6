//! Helper macros used by the codec.

/// Returns early with `$error` when `$predicate` does not hold.
///
/// ```ignore
/// ensure!(frame_len <= MAX_HEADER_BYTES, ParseError::too_large_header(frame_len, MAX_HEADER_BYTES));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
