///
/// Scalar Registry
///
/// Single source of truth for the value types a cursor token can carry.
///

// NOTE: Entry order is part of the token wire format.
// The tag written for a value is its entry's position, and issued tokens embed
// that position. Entries are append-only: never reorder, never remove.
// Every entry must be a fixed-width integer with `to_be_bytes`/`from_be_bytes`.
macro_rules! scalar_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Int, i64, tag = 0),
            (Int32, i32, tag = 1),
        }
    };
}

macro_rules! scalar_registry {
    ($macro:ident) => {
        scalar_registry_entries! { $macro }
    };
    ($macro:ident, $($args:tt)+) => {
        scalar_registry_entries! { $macro, @args $($args)+ }
    };
}
