//! Common test fixtures for cover tests.
//!
//! PNG inspection helpers plus pre-defined request parameters.

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Header fields of an encoded PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    /// 3 = indexed, 6 = RGBA
    pub color_type: u8,
}

/// Read the IHDR of a PNG. Returns `None` if the bytes are not a PNG.
pub fn png_info(bytes: &[u8]) -> Option<PngInfo> {
    if bytes.len() < 33 || bytes[0..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let be = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    Some(PngInfo {
        width: be(16),
        height: be(20),
        bit_depth: bytes[24],
        color_type: bytes[25],
    })
}

/// Chunk types of a PNG in file order, e.g. `["IHDR", "PLTE", "IDAT", "IEND"]`.
pub fn png_chunk_types(bytes: &[u8]) -> Vec<String> {
    let mut types = Vec::new();
    let mut pos = 8;
    while pos + 8 <= bytes.len() {
        let len = u32::from_be_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
            as usize;
        types.push(String::from_utf8_lossy(&bytes[pos + 4..pos + 8]).into_owned());
        // length + type + data + crc
        pos += 12 + len;
    }
    types
}

/// Color parameters as users type them, paired with the RGB they resolve to.
pub mod colors {
    pub const NAMED: &[(&str, (u8, u8, u8))] = &[
        ("red", (255, 0, 0)),
        ("navy", (0, 0, 128)),
        ("rebeccapurple", (102, 51, 153)),
        ("gray", (128, 128, 128)),
        ("white", (255, 255, 255)),
    ];

    pub const HEX: &[(&str, (u8, u8, u8))] = &[
        ("ff8800", (255, 136, 0)),
        ("1E90FF", (30, 144, 255)),
        ("000000", (0, 0, 0)),
    ];

    /// Inputs that fail validation and fall back to the default color.
    pub const INVALID: &[&str] = &["notacolor", "12345", "1234567", "gggggg", "", "#12"];
}

/// Sample FEN positions.
pub mod fen {
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    /// Position after 1. e4
    pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    /// Two kings only
    pub const BARE_KINGS: &str = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";

    pub const INVALID: &[&str] = &[
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
    ];
}
