/// Unwraps `Some` or returns `ParseError::MalformedField` naming the field
/// that could not be consumed.
macro_rules! expect {
    ($primitive:expr, $field:expr) => {
        match $primitive {
            Some(v) => v,
            None => return Err($crate::err::ParseError::MalformedField($field)),
        }
    };
}

/// Stores the value of a `cursor::Field`.
///
/// A value from the last field of the sentence is stored before returning
/// `ParseError::MalformedField`, as the fields that were expected after it
/// are missing.
macro_rules! field {
    ($primitive:expr, $field:expr, |$v:ident| $store:expr) => {
        match $primitive {
            $crate::cursor::Field::Next($v) => {
                $store;
            }
            $crate::cursor::Field::Last($v) => {
                $store;
                return Err($crate::err::ParseError::MalformedField($field));
            }
            $crate::cursor::Field::Invalid => {
                return Err($crate::err::ParseError::MalformedField($field))
            }
        }
    };
}

/// Narrows a decoded value into the integer type of the Fix field it is
/// stored in.
macro_rules! narrow {
    ($value:expr, $ty:ty, $field:expr) => {
        match <$ty as ::std::convert::TryFrom<_>>::try_from($value) {
            Ok(v) => v,
            Err(_) => return Err($crate::err::ParseError::MalformedField($field)),
        }
    };
}
