//! Chess diagram covers.
//!
//! Positions come from FEN strings, either supplied directly or looked up in
//! a table of named openings. The board is drawn as SVG and rasterized with
//! resvg, centered on a cover-sized canvas.

use serde::Serialize;

use cover_common::{CanvasSize, CoverError, CoverResult, Rgb};

use crate::svg::SvgRasterizer;

/// Standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const LIGHT_SQUARE: &str = "#ffce9e";
const DARK_SQUARE: &str = "#d18b47";
const BORDER: &str = "#212121";
const COORDINATE: &str = "#e5e5e5";

const PIECE_FONT_FAMILIES: &str =
    "'DejaVu Sans', 'Noto Sans Symbols2', 'Segoe UI Symbol', 'Arial Unicode MS', sans-serif";

/// A named opening and the position after its defining moves.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Opening {
    pub slug: &'static str,
    pub name: &'static str,
    pub moves: &'static str,
    pub fen: &'static str,
}

/// Known openings, addressable by slug.
pub const OPENINGS: &[Opening] = &[
    Opening {
        slug: "starting-position",
        name: "Starting Position",
        moves: "",
        fen: STARTING_FEN,
    },
    Opening {
        slug: "italian-game",
        name: "Italian Game",
        moves: "1. e4 e5 2. Nf3 Nc6 3. Bc4",
        fen: "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
    },
    Opening {
        slug: "ruy-lopez",
        name: "Ruy Lopez",
        moves: "1. e4 e5 2. Nf3 Nc6 3. Bb5",
        fen: "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
    },
    Opening {
        slug: "scotch-game",
        name: "Scotch Game",
        moves: "1. e4 e5 2. Nf3 Nc6 3. d4",
        fen: "r1bqkbnr/pppp1ppp/2n5/4p3/3PP3/5N2/PPP2PPP/RNBQKB1R b KQkq d3 0 3",
    },
    Opening {
        slug: "petrov-defense",
        name: "Petrov's Defense",
        moves: "1. e4 e5 2. Nf3 Nf6",
        fen: "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    },
    Opening {
        slug: "vienna-game",
        name: "Vienna Game",
        moves: "1. e4 e5 2. Nc3",
        fen: "rnbqkbnr/pppp1ppp/8/4p3/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 1 2",
    },
    Opening {
        slug: "kings-gambit",
        name: "King's Gambit",
        moves: "1. e4 e5 2. f4",
        fen: "rnbqkbnr/pppp1ppp/8/4p3/4PP2/8/PPPP2PP/RNBQKBNR b KQkq f3 0 2",
    },
    Opening {
        slug: "sicilian-defense",
        name: "Sicilian Defense",
        moves: "1. e4 c5",
        fen: "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
    },
    Opening {
        slug: "french-defense",
        name: "French Defense",
        moves: "1. e4 e6",
        fen: "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
    },
    Opening {
        slug: "caro-kann-defense",
        name: "Caro-Kann Defense",
        moves: "1. e4 c6",
        fen: "rnbqkbnr/pp1ppppp/2p5/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
    },
    Opening {
        slug: "scandinavian-defense",
        name: "Scandinavian Defense",
        moves: "1. e4 d5",
        fen: "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
    },
    Opening {
        slug: "alekhine-defense",
        name: "Alekhine's Defense",
        moves: "1. e4 Nf6",
        fen: "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2",
    },
    Opening {
        slug: "pirc-defense",
        name: "Pirc Defense",
        moves: "1. e4 d6 2. d4 Nf6 3. Nc3 g6",
        fen: "rnbqkb1r/ppp1pp1p/3p1np1/8/3PP3/2N5/PPP2PPP/R1BQKBNR w KQkq - 0 4",
    },
    Opening {
        slug: "queens-gambit",
        name: "Queen's Gambit",
        moves: "1. d4 d5 2. c4",
        fen: "rnbqkbnr/ppp1pppp/8/3p4/2PP4/8/PP2PPPP/RNBQKBNR b KQkq c3 0 2",
    },
    Opening {
        slug: "slav-defense",
        name: "Slav Defense",
        moves: "1. d4 d5 2. c4 c6",
        fen: "rnbqkbnr/pp2pppp/2p5/3p4/2PP4/8/PP2PPPP/RNBQKBNR w KQkq - 0 3",
    },
    Opening {
        slug: "london-system",
        name: "London System",
        moves: "1. d4 d5 2. Bf4",
        fen: "rnbqkbnr/ppp1pppp/8/3p4/3P1B2/8/PPP1PPPP/RN1QKBNR b KQkq - 1 2",
    },
    Opening {
        slug: "kings-indian-defense",
        name: "King's Indian Defense",
        moves: "1. d4 Nf6 2. c4 g6",
        fen: "rnbqkb1r/pppppp1p/5np1/8/2PP4/8/PP2PPPP/RNBQKBNR w KQkq - 0 3",
    },
    Opening {
        slug: "nimzo-indian-defense",
        name: "Nimzo-Indian Defense",
        moves: "1. d4 Nf6 2. c4 e6 3. Nc3 Bb4",
        fen: "rnbqk2r/pppp1ppp/4pn2/8/1bPP4/2N5/PP2PPPP/R1BQKBNR w KQkq - 2 4",
    },
    Opening {
        slug: "grunfeld-defense",
        name: "Grünfeld Defense",
        moves: "1. d4 Nf6 2. c4 g6 3. Nc3 d5",
        fen: "rnbqkb1r/ppp1pp1p/5np1/3p4/2PP4/2N5/PP2PPPP/R1BQKBNR w KQkq d6 0 4",
    },
    Opening {
        slug: "dutch-defense",
        name: "Dutch Defense",
        moves: "1. d4 f5",
        fen: "rnbqkbnr/ppppp1pp/8/5p2/3P4/8/PPP1PPPP/RNBQKBNR w KQkq f6 0 2",
    },
    Opening {
        slug: "english-opening",
        name: "English Opening",
        moves: "1. c4",
        fen: "rnbqkbnr/pppppppp/8/8/2P5/8/PP1PPPPP/RNBQKBNR b KQkq c3 0 1",
    },
];

/// Reduce an opening name to its lookup form: lowercase ASCII letters and digits only.
fn opening_lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Find an opening by slug, ignoring case and `-`, `_`, space and apostrophes.
pub fn find_opening(name: &str) -> CoverResult<&'static Opening> {
    let wanted = opening_lookup_key(name);
    OPENINGS
        .iter()
        .find(|o| opening_lookup_key(o.slug) == wanted)
        .ok_or_else(|| CoverError::UnknownOpening(name.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Parse a FEN piece letter (uppercase white, lowercase black).
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
        Some(Self { side, kind })
    }

    pub fn fen_char(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// Solid Unicode chess glyph. White pieces are drawn with the same
    /// glyph filled white and outlined.
    pub fn glyph(&self) -> char {
        match self.kind {
            PieceKind::King => '\u{265A}',
            PieceKind::Queen => '\u{265B}',
            PieceKind::Rook => '\u{265C}',
            PieceKind::Bishop => '\u{265D}',
            PieceKind::Knight => '\u{265E}',
            PieceKind::Pawn => '\u{265F}',
        }
    }
}

/// Piece placement. `squares[0]` is rank 8, `squares[r][0]` is the a-file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pub side_to_move: Side,
}

impl Board {
    pub fn starting() -> Self {
        // STARTING_FEN is a constant known to parse
        Self::from_fen(STARTING_FEN).unwrap_or(Self {
            squares: [[None; 8]; 8],
            side_to_move: Side::White,
        })
    }

    /// Parse a FEN string. Only piece placement and side to move are kept;
    /// castling, en passant and move counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> CoverResult<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| CoverError::InvalidFen("empty FEN".to_string()))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(CoverError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut squares = [[None; 8]; 8];
        for (r, rank) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(CoverError::InvalidFen(format!("bad empty count '{}'", c)));
                    }
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or_else(|| CoverError::InvalidFen(format!("bad piece '{}'", c)))?;
                    if file >= 8 {
                        return Err(CoverError::InvalidFen(format!("rank {} too long", 8 - r)));
                    }
                    squares[r][file] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(CoverError::InvalidFen(format!("rank {} too long", 8 - r)));
                }
            }
            if file != 8 {
                return Err(CoverError::InvalidFen(format!(
                    "rank {} has {} files",
                    8 - r,
                    file
                )));
            }
        }

        let side_to_move = match fields.next() {
            None | Some("w") => Side::White,
            Some("b") => Side::Black,
            Some(other) => {
                return Err(CoverError::InvalidFen(format!("bad side to move '{}'", other)))
            }
        };

        Ok(Self {
            squares,
            side_to_move,
        })
    }

    /// Piece on a square; `file` 0..8 = a..h, `rank` 0..8 = 1..8.
    pub fn piece_at(&self, file: usize, rank: usize) -> Option<Piece> {
        if file >= 8 || rank >= 8 {
            return None;
        }
        self.squares[7 - rank][file]
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().filter(|p| p.is_some()).count()
    }

    /// The piece-placement field of this board's FEN.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for (r, rank) in self.squares.iter().enumerate() {
            if r > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for square in rank {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }
}

/// Board diagram options.
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    /// Draw from black's side (h8 in the bottom-left corner).
    pub flipped: bool,
    /// Draw file letters and rank numbers in the border.
    pub coordinates: bool,
    /// Canvas color around the board.
    pub background: Rgb,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            flipped: false,
            coordinates: true,
            background: Rgb::new(255, 255, 255),
        }
    }
}

/// SVG document with the board centered on the canvas.
pub fn board_svg(board: &Board, size: CanvasSize, options: &DiagramOptions) -> String {
    let board_px = size.width.min(size.height) as f32;
    let margin = if options.coordinates { board_px / 20.0 } else { 0.0 };
    let square = (board_px - 2.0 * margin) / 8.0;
    let x0 = (size.width as f32 - board_px) / 2.0;
    let y0 = (size.height as f32 - board_px) / 2.0;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height
    );
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        size.width,
        size.height,
        options.background.to_hex()
    ));
    svg.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        x0, y0, board_px, board_px, BORDER
    ));

    let piece_size = square * 0.85;
    for row in 0..8 {
        for col in 0..8 {
            // row 0 is the top of the diagram
            let (file, rank) = if options.flipped {
                (7 - col, row)
            } else {
                (col, 7 - row)
            };
            let x = x0 + margin + col as f32 * square;
            let y = y0 + margin + row as f32 * square;
            let fill = if (file + rank) % 2 == 0 { DARK_SQUARE } else { LIGHT_SQUARE };
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                x, y, square, square, fill
            ));

            if let Some(piece) = board.piece_at(file, rank) {
                let (fill, stroke) = match piece.side {
                    Side::White => ("#ffffff", r##" stroke="#000000" stroke-width="1""##),
                    Side::Black => ("#000000", ""),
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}"{} text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    x + square / 2.0,
                    y + square / 2.0,
                    PIECE_FONT_FAMILIES,
                    piece_size,
                    fill,
                    stroke,
                    piece.glyph()
                ));
            }
        }
    }

    if options.coordinates {
        let font_size = margin * 0.8;
        for i in 0..8 {
            let file_label =
                char::from(if options.flipped { b'h' - i as u8 } else { b'a' + i as u8 });
            let rank_label = if options.flipped { i + 1 } else { 8 - i };
            let along = margin + (i as f32 + 0.5) * square;
            // file letters under the board, rank numbers left of it
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                x0 + along,
                y0 + board_px - margin / 2.0,
                PIECE_FONT_FAMILIES,
                font_size,
                COORDINATE,
                file_label
            ));
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                x0 + margin / 2.0,
                y0 + along,
                PIECE_FONT_FAMILIES,
                font_size,
                COORDINATE,
                rank_label
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Render a chess diagram cover as RGBA.
pub fn render_board(
    rasterizer: &SvgRasterizer,
    board: &Board,
    size: CanvasSize,
    options: &DiagramOptions,
) -> CoverResult<Vec<u8>> {
    rasterizer.rasterize(&board_svg(board, size, options), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_roundtrip() {
        for c in "pnbrqkPNBRQK".chars() {
            assert_eq!(Piece::from_fen_char(c).unwrap().fen_char(), c);
        }
        assert!(Piece::from_fen_char('x').is_none());
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(opening_lookup_key("King's_Gambit"), "kingsgambit");
        assert_eq!(opening_lookup_key("kings-gambit"), "kingsgambit");
    }
}
