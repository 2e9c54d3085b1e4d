pub mod buffers;
pub mod fourcc;
pub mod hal;
