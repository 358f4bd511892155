/// 2.9" tri-colour panel, portrait orientation as the controller scans it.
pub const EPD_WIDTH: u32 = 128;
pub const EPD_HEIGHT: u32 = 296;

pub const PIXELS_PER_BYTE: usize = 8;
/// bytes per plane, one bit per pixel
pub const EPD_PLANE_BYTES: usize = EPD_WIDTH as usize * EPD_HEIGHT as usize / PIXELS_PER_BYTE;
