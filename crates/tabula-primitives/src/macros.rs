#[macro_export]
macro_rules! encoding_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Int8, Signed, fixed_width = 1, is_textual = false),
            (Int16, Signed, fixed_width = 2, is_textual = false),
            (Int32, Signed, fixed_width = 4, is_textual = false),
            (Int64, Signed, fixed_width = 8, is_textual = false),
            (Uint8, Unsigned, fixed_width = 1, is_textual = false),
            (Uint16, Unsigned, fixed_width = 2, is_textual = false),
            (Uint32, Unsigned, fixed_width = 4, is_textual = false),
            (Uint64, Unsigned, fixed_width = 8, is_textual = false),
            (Float64, Float, fixed_width = 8, is_textual = false),
            (Bool, Bool, fixed_width = 1, is_textual = false),
            (Text, Text, fixed_width = 0, is_textual = true),
            (Bytes, Bytes, fixed_width = 0, is_textual = false),
        }
    };
}

#[macro_export]
macro_rules! encoding_registry {
    ($macro:ident) => {
        $crate::encoding_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::encoding_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $encoding:expr; @entries $( ($variant:ident, $family:ident, fixed_width = $width:expr, is_textual = $textual:expr) ),* $(,)? ) => {
        match $encoding {
            $(
                $crate::Encoding::$variant => $crate::EncodingMetadata {
                    family: $crate::EncodingFamily::$family,
                    fixed_width: $width,
                    is_textual: $textual,
                },
            )*
        }
    };
}

macro_rules! all_encodings_from_registry {
    ( @entries $( ($variant:ident, $family:ident, fixed_width = $width:expr, is_textual = $textual:expr) ),* $(,)? ) => {
        [ $( $crate::Encoding::$variant ),* ]
    };
}

macro_rules! name_from_registry {
    ( @args $encoding:expr; @entries $( ($variant:ident, $family:ident, fixed_width = $width:expr, is_textual = $textual:expr) ),* $(,)? ) => {
        match $encoding {
            $(
                $crate::Encoding::$variant => stringify!($variant),
            )*
        }
    };
}
