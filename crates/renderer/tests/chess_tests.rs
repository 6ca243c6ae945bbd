//! Tests for FEN parsing, opening lookup and board diagrams.

use cover_common::{CanvasSize, CoverError, Rgb};
use renderer::chess::{
    board_svg, find_opening, render_board, Board, DiagramOptions, PieceKind, Side, OPENINGS,
    STARTING_FEN,
};
use renderer::SvgRasterizer;
use test_utils::{fen, pixel_at};
use usvg::fontdb;

fn glyphless_rasterizer() -> SvgRasterizer {
    // No fonts: pieces and coordinates are skipped, squares still render
    SvgRasterizer::with_database(fontdb::Database::new())
}

// ============================================================================
// FEN parsing
// ============================================================================

#[test]
fn test_starting_position() {
    let board = Board::from_fen(STARTING_FEN).unwrap();
    assert_eq!(board.piece_count(), 32);
    assert_eq!(board.side_to_move, Side::White);

    let e1 = board.piece_at(4, 0).unwrap();
    assert_eq!((e1.side, e1.kind), (Side::White, PieceKind::King));
    let d8 = board.piece_at(3, 7).unwrap();
    assert_eq!((d8.side, d8.kind), (Side::Black, PieceKind::Queen));
    assert!(board.piece_at(4, 3).is_none());
}

#[test]
fn test_after_e4() {
    let board = Board::from_fen(fen::AFTER_E4).unwrap();
    assert_eq!(board.side_to_move, Side::Black);
    assert!(board.piece_at(4, 1).is_none());
    let e4 = board.piece_at(4, 3).unwrap();
    assert_eq!((e4.side, e4.kind), (Side::White, PieceKind::Pawn));
}

#[test]
fn test_placement_only_fen() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
    assert_eq!(board.piece_count(), 2);
    assert_eq!(board.side_to_move, Side::White);
}

#[test]
fn test_placement_roundtrip() {
    let board = Board::from_fen(fen::BARE_KINGS).unwrap();
    assert_eq!(board.placement(), "4k3/8/8/8/8/8/8/4K3");
}

#[test]
fn test_starting_matches_constant() {
    assert_eq!(Board::starting(), Board::from_fen(STARTING_FEN).unwrap());
}

#[test]
fn test_invalid_fens_rejected() {
    for bad in fen::INVALID {
        match Board::from_fen(bad) {
            Err(CoverError::InvalidFen(_)) => {}
            other => panic!("{:?} should be rejected, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_out_of_range_square() {
    let board = Board::starting();
    assert!(board.piece_at(8, 0).is_none());
    assert!(board.piece_at(0, 8).is_none());
}

// ============================================================================
// Openings
// ============================================================================

#[test]
fn test_every_opening_parses() {
    for opening in OPENINGS {
        let board = Board::from_fen(opening.fen)
            .unwrap_or_else(|e| panic!("{} has a bad FEN: {}", opening.slug, e));
        assert!(board.piece_count() <= 32, "{}", opening.slug);

        let kings = |side| {
            (0..8)
                .flat_map(|f| (0..8).map(move |r| (f, r)))
                .filter_map(|(f, r)| board.piece_at(f, r))
                .filter(|p| p.kind == PieceKind::King && p.side == side)
                .count()
        };
        assert_eq!(kings(Side::White), 1, "{}", opening.slug);
        assert_eq!(kings(Side::Black), 1, "{}", opening.slug);
    }
}

#[test]
fn test_opening_slugs_unique() {
    let mut slugs: Vec<&str> = OPENINGS.iter().map(|o| o.slug).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), OPENINGS.len());
}

#[test]
fn test_find_opening_spellings() {
    for name in ["ruy-lopez", "Ruy Lopez", "ruy_lopez", "RUYLOPEZ"] {
        assert_eq!(find_opening(name).unwrap().slug, "ruy-lopez", "{}", name);
    }
    assert_eq!(find_opening("King's Gambit").unwrap().slug, "kings-gambit");
}

#[test]
fn test_find_unknown_opening() {
    let err = find_opening("bongcloud-attack").unwrap_err();
    assert!(matches!(err, CoverError::UnknownOpening(_)));
    assert_eq!(err.http_status_code(), 404);
}

// ============================================================================
// Diagrams
// ============================================================================

#[test]
fn test_svg_has_64_squares_and_pieces() {
    let svg = board_svg(&Board::starting(), CanvasSize::cover(), &DiagramOptions::default());
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("#ffce9e").count(), 32);
    assert_eq!(svg.matches("#d18b47").count(), 32);
    assert!(svg.contains('\u{265A}'));
    assert!(svg.contains('\u{265F}'));
}

#[test]
fn test_svg_without_coordinates() {
    let options = DiagramOptions {
        coordinates: false,
        ..DiagramOptions::default()
    };
    let svg = board_svg(&Board::starting(), CanvasSize::cover(), &options);
    assert!(!svg.contains(">a</text>"));

    let with_coords = board_svg(&Board::starting(), CanvasSize::cover(), &DiagramOptions::default());
    assert!(with_coords.contains(">a</text>"));
    assert!(with_coords.contains(">8</text>"));
}

#[test]
fn test_render_board_layout() {
    let size = CanvasSize::cover();
    let pixels = render_board(
        &glyphless_rasterizer(),
        &Board::from_fen(fen::BARE_KINGS).unwrap(),
        size,
        &DiagramOptions::default(),
    )
    .unwrap();
    assert_eq!(pixels.len(), size.rgba_len());

    let w = size.width as usize;
    // canvas background left of the centered board
    assert_eq!(pixel_at(&pixels, w, 10, 10), [255, 255, 255, 255]);
    // board border
    assert_eq!(pixel_at(&pixels, w, 605, 5), [33, 33, 33, 255]);
    // a8 is a light square, a1 is dark
    assert_eq!(pixel_at(&pixels, w, 630, 30), [255, 206, 158, 255]);
    assert_eq!(pixel_at(&pixels, w, 630, 270), [209, 139, 71, 255]);
}

#[test]
fn test_render_board_custom_background() {
    let options = DiagramOptions {
        background: Rgb::new(0, 0, 128),
        ..DiagramOptions::default()
    };
    let size = CanvasSize::cover();
    let pixels = render_board(&glyphless_rasterizer(), &Board::starting(), size, &options).unwrap();
    assert_eq!(pixel_at(&pixels, size.width as usize, 1400, 150), [0, 0, 128, 255]);
}

#[test]
fn test_flipped_board_orientation() {
    let options = DiagramOptions {
        flipped: true,
        ..DiagramOptions::default()
    };
    let svg = board_svg(&Board::starting(), CanvasSize::cover(), &options);
    // h-file label comes first when viewed from black's side
    let h = svg.find(">h</text>").unwrap();
    let a = svg.find(">a</text>").unwrap();
    assert!(h < a);
}
