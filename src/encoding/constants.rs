/// Opens a data payload.
pub(crate) const DATA_OPEN: u8 = b'<';
/// Closes a data payload.
pub(crate) const DATA_CLOSE: u8 = b'>';
/// Opens an array body.
pub(crate) const ARRAY_OPEN: u8 = b'[';
/// Closes an array body.
pub(crate) const ARRAY_CLOSE: u8 = b']';
/// Opens a dict body.
pub(crate) const DICT_OPEN: u8 = b'{';
/// Closes a dict body.
pub(crate) const DICT_CLOSE: u8 = b'}';
