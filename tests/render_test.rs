//! Renderer variants against in-memory targets.
//!
//! Both variants draw the same snapshot; the rasterized one goes through the
//! software GPU so its output can be compared pixel for pixel.

use blockfall::core::{
    ActivePiece, ActiveSnapshot, Board, EngineConfig, GameLoop, GameSnapshot, ManualScheduler,
    RenderError, Renderer, ScriptedSource, Viewport,
};
use blockfall::render::{
    color_for, ghost_color, select_renderer, Pixmap, RasterRenderer, RendererKind, SoftwareGpu,
    Surface2d, SurfaceRenderer, BACKGROUND, FRAGMENT_SHADER, VERTEX_SHADER, WELL,
};
use blockfall::term::{shared_frame, FrameSurface, Hud, HUD_WIDTH};
use blockfall::types::{GameStatus, PieceKind, Rotation};

/// 100x200 px viewport: 10 px cells, no margin.
const VIEW: Viewport = Viewport::new(100, 200);

fn snapshot_with_pieces() -> GameSnapshot {
    let mut board = Board::new();
    board
        .commit(&ActivePiece::at(PieceKind::O, Rotation::North, 0, 18))
        .unwrap();
    board
        .commit(&ActivePiece::at(PieceKind::I, Rotation::North, 3, 18))
        .unwrap();

    let active = ActivePiece::at(PieceKind::T, Rotation::North, 6, 2);
    let mut snap = GameSnapshot {
        status: GameStatus::Play,
        ..GameSnapshot::default()
    };
    board.write_grid(&mut snap.board);
    snap.active = Some(ActiveSnapshot::new(&active, &board));
    snap
}

#[test]
fn test_surface_paints_locked_active_and_ghost() {
    let snap = snapshot_with_pieces();
    let mut renderer = SurfaceRenderer::new(Pixmap::new(VIEW.width, VIEW.height));
    renderer.render(&snap, VIEW).unwrap();
    let pm = renderer.surface();

    // 4 O cells, 4 I cells, 4 T cells, 4 ghost cells; 100 px each.
    assert_eq!(pm.count(color_for(PieceKind::O)), 400);
    assert_eq!(pm.count(color_for(PieceKind::I)), 400);
    assert_eq!(pm.count(color_for(PieceKind::T)), 400);
    assert_eq!(pm.count(ghost_color(PieceKind::T)), 400);
    assert_eq!(pm.count(WELL), 100 * 200 - 1600);

    // Top-left of the O at board cell (0, 18).
    assert_eq!(pm.pixel(0, 180), Some(color_for(PieceKind::O)));
    assert_eq!(pm.pixel(9, 199), Some(color_for(PieceKind::O)));
}

#[test]
fn test_board_is_centered_with_background_margin() {
    let snap = GameSnapshot::default();
    let mut renderer = SurfaceRenderer::new(Pixmap::new(140, 200));
    renderer.render(&snap, Viewport::new(140, 200)).unwrap();
    let pm = renderer.surface();

    assert_eq!(pm.pixel(0, 0), Some(BACKGROUND));
    assert_eq!(pm.pixel(19, 100), Some(BACKGROUND));
    assert_eq!(pm.pixel(20, 100), Some(WELL));
    assert_eq!(pm.pixel(119, 100), Some(WELL));
    assert_eq!(pm.pixel(120, 100), Some(BACKGROUND));
}

#[test]
fn test_empty_viewport_uses_surface_size() {
    let snap = snapshot_with_pieces();
    let mut renderer = SurfaceRenderer::new(Pixmap::new(100, 200));
    renderer.render(&snap, Viewport::default()).unwrap();
    assert_eq!(renderer.surface().count(color_for(PieceKind::O)), 400);
}

#[test]
fn test_raster_empty_viewport_uses_target_size() {
    let snap = snapshot_with_pieces();
    let gpu = SoftwareGpu::new(Pixmap::new(100, 200));
    let mut raster = RasterRenderer::new(gpu).unwrap();
    raster.render(&snap, Viewport::default()).unwrap();
    assert_eq!(raster.gpu().target().count(color_for(PieceKind::O)), 400);
    assert_eq!(raster.gpu().target().count(color_for(PieceKind::T)), 400);

    let mut surface = SurfaceRenderer::new(Pixmap::new(100, 200));
    surface.render(&snap, Viewport::default()).unwrap();
    assert_eq!(raster.gpu().target(), surface.surface());
}

#[test]
fn test_raster_matches_surface_pixels() {
    let snap = snapshot_with_pieces();

    let mut surface = SurfaceRenderer::new(Pixmap::new(VIEW.width, VIEW.height));
    surface.render(&snap, VIEW).unwrap();

    let gpu = SoftwareGpu::new(Pixmap::new(VIEW.width, VIEW.height));
    let mut raster = RasterRenderer::new(gpu).unwrap();
    raster.render(&snap, VIEW).unwrap();

    assert_eq!(raster.name(), "raster");
    assert_eq!(raster.gpu().target(), surface.surface());
}

#[test]
fn test_raster_releases_everything_on_drop() {
    let mut gpu = SoftwareGpu::new(Pixmap::new(10, 20));
    {
        let mut raster = RasterRenderer::new(&mut gpu).unwrap();
        raster.render(&GameSnapshot::default(), Viewport::new(10, 20)).unwrap();
    }
    assert_eq!(gpu.live_shaders(), 0);
    assert_eq!(gpu.live_programs(), 0);
    assert_eq!(gpu.live_buffers(), 0);
}

#[test]
fn test_raster_failure_releases_partial_acquisition() {
    // Shaders compile and link, then the buffer allocation fails.
    let mut gpu = SoftwareGpu::new(Pixmap::new(10, 20)).with_buffer_limit(0);
    let err = RasterRenderer::new(&mut gpu).err();
    assert_eq!(err, Some(RenderError::BufferAllocation));
    assert_eq!(gpu.live_shaders(), 0);
    assert_eq!(gpu.live_programs(), 0);

    // Fragment shader rejected after the vertex shader was compiled.
    let mut gpu = SoftwareGpu::new(Pixmap::new(10, 20));
    let err = RasterRenderer::with_shaders(&mut gpu, VERTEX_SHADER, "precision mediump float;").err();
    assert!(matches!(err, Some(RenderError::ShaderCompile { stage: "fragment", .. })));
    assert_eq!(gpu.live_shaders(), 0);
}

#[test]
fn test_raster_missing_uniform() {
    let mut gpu = SoftwareGpu::new(Pixmap::new(10, 20));
    let fragment = FRAGMENT_SHADER.replace("u_color", "u_tint");
    let err = RasterRenderer::with_shaders(&mut gpu, VERTEX_SHADER, &fragment).err();
    assert_eq!(err, Some(RenderError::MissingUniform("u_color")));
    assert_eq!(gpu.live_programs(), 0);
    assert_eq!(gpu.live_shaders(), 0);
}

#[test]
fn test_surface_requires_context() {
    let err = SurfaceRenderer::<Pixmap>::from_context(None).err();
    assert_eq!(err, Some(RenderError::ContextUnavailable("2d surface")));
    assert!(err.unwrap().is_configuration());
}

#[test]
fn test_selection_falls_back_to_surface() {
    let failing = SoftwareGpu::new(Pixmap::new(10, 20)).with_buffer_limit(0);
    let renderer =
        select_renderer(RendererKind::Raster, Some(failing), Some(Pixmap::new(10, 20))).unwrap();
    assert_eq!(renderer.name(), "surface");

    let renderer = select_renderer(
        RendererKind::Raster,
        None::<SoftwareGpu<Pixmap>>,
        Some(Pixmap::new(10, 20)),
    )
    .unwrap();
    assert_eq!(renderer.name(), "surface");

    let gpu = SoftwareGpu::new(Pixmap::new(10, 20));
    let renderer = select_renderer(RendererKind::Raster, Some(gpu), None::<Pixmap>).unwrap();
    assert_eq!(renderer.name(), "raster");
}

#[test]
fn test_selection_without_any_target_errors() {
    let err = select_renderer(
        RendererKind::Surface,
        None::<SoftwareGpu<Pixmap>>,
        None::<Pixmap>,
    )
    .err();
    assert_eq!(err, Some(RenderError::ContextUnavailable("2d surface")));
}

#[test]
fn test_game_loop_draws_into_terminal_frame() {
    let frame = shared_frame(60, 24);
    let surface = FrameSurface::new(frame.clone(), HUD_WIDTH);
    let (w, h) = surface.size();
    assert_eq!((w, h), (19, 24));

    let mut game = GameLoop::new(
        EngineConfig::default(),
        ManualScheduler::new(),
        ScriptedSource::new([PieceKind::O]),
    )
    .with_renderer(Box::new(SurfaceRenderer::new(surface)));
    game.set_viewport(Viewport::new(w, h));
    game.start();
    game.tick(16).unwrap();

    let fb = frame.borrow();
    let o = color_for(PieceKind::O);
    let painted = fb.cells().iter().filter(|c| c.style.bg == o).count();
    // 4 cells of 1x1 pixel, 2 columns each.
    assert_eq!(painted, 8);
    drop(fb);

    let snap = game.snapshot();
    let mut fb = frame.borrow_mut();
    let hud = Hud::right_of(&fb);
    hud.draw(&mut fb, &snap, "surface", None);
    assert!((0..fb.height()).any(|y| fb.row_text(y).contains("NEXT") && fb.row_text(y).contains('O')));
}
