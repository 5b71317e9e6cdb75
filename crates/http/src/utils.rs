//! Internal helpers.

/// Returns early with `$error` unless `$predicate` holds.
///
/// ```ignore
/// ensure!(self.header_lines <= MAX_HEADER_NUM, ParseError::too_many_headers(MAX_HEADER_NUM));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
