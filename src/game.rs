use rand::rngs::ThreadRng;
use rand::thread_rng;
use rusttype::{point, Font, Scale};
use std::fs;
use std::iter::repeat;
use std::time::{Duration, Instant};
use tracing::info;
use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

use crate::colors::{Color, BACKGROUND, FLAME, GRAY, GREEN, HIGHLIGHT, PANEL, WHITE, YELLOW};
use crate::config::{Config, FontConfig};
use crate::error::GameError;
use crate::modes::Mode;
use crate::session::{HighScores, Session};

// frame size consts
pub const WIDTH: u32 = 720;
pub const HEIGHT: u32 = 600;

// playing screen layout
const TARGET_SIZE: usize = 160;
const TARGET_TOP: usize = 130;
const SWATCH_SIZE: usize = 80;
const SWATCH_GAP: usize = 20;
const SWATCH_TOP: usize = 360;
const BORDER: usize = 4;

// mode select layout
const CARD_LEFT: usize = 60;
const CARD_WIDTH: usize = 600;
const CARD_HEIGHT: usize = 100;
const CARD_GAP: usize = 20;
const CARDS_TOP: usize = 160;

const SWATCH_KEYS: [VirtualKeyCode; 6] = [
    VirtualKeyCode::Key1,
    VirtualKeyCode::Key2,
    VirtualKeyCode::Key3,
    VirtualKeyCode::Key4,
    VirtualKeyCode::Key5,
    VirtualKeyCode::Key6,
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Screen {
    ModeSelect,
    Playing,
    GameOver,
}

/// Representation of the application state: which screen is up, the live
/// session, the process-lifetime high scores, and every pending deadline.
/// All timing lives here so the session itself stays clock-free.
pub struct World {
    font: Font<'static>,
    rng: ThreadRng,
    screen: Screen,
    session: Option<Session>,
    high_scores: HighScores,
    cursor: usize,
    next_tick: Instant,
    // one-shot deadlines; cleared whenever the round or screen they were
    // scheduled against goes away
    hide_target_at: Option<Instant>,
    notice_until: Option<Instant>,
    watched_round: u32,
    memory_hide: Duration,
    notice_len: Duration,
}

impl World {
    pub fn new(config: &Config) -> Result<Self, GameError> {
        let font = load_font(&config.font)?;
        Ok(World {
            font,
            rng: thread_rng(),
            screen: Screen::ModeSelect,
            session: None,
            high_scores: HighScores::new(),
            cursor: 0,
            next_tick: Instant::now(),
            hide_target_at: None,
            notice_until: None,
            watched_round: 0,
            memory_hide: Duration::from_millis(config.timing.memory_hide_ms),
            notice_len: Duration::from_secs(config.timing.notice_secs),
        })
    }

    /// Update the `World` internal state from this frame's input.
    pub fn update(&mut self, input: &WinitInputHelper) {
        match self.screen {
            Screen::ModeSelect => self.update_mode_select(input),
            Screen::Playing => self.update_playing(input),
            Screen::GameOver => self.update_game_over(input),
        }
    }

    fn update_mode_select(&mut self, input: &WinitInputHelper) {
        let count = Mode::ALL.len();
        if input.key_pressed(VirtualKeyCode::Up) {
            self.cursor = (self.cursor + count - 1) % count;
        }
        if input.key_pressed(VirtualKeyCode::Down) {
            self.cursor = (self.cursor + 1) % count;
        }

        let mut picked = None;
        if input.key_pressed(VirtualKeyCode::Return) || input.key_pressed(VirtualKeyCode::Space) {
            picked = Some(self.cursor);
        }
        for (i, key) in SWATCH_KEYS.iter().take(count).enumerate() {
            if input.key_pressed(*key) {
                picked = Some(i);
            }
        }
        if let Some(i) = picked {
            self.select_mode(Mode::ALL[i]);
        }
    }

    fn select_mode(&mut self, mode: Mode) {
        let session = Session::start(mode, &mut self.rng);
        self.watched_round = session.round_id;
        self.session = Some(session);
        self.screen = Screen::Playing;
        self.cursor = 0;
        self.next_tick = Instant::now() + Duration::from_secs(1);
        self.notice_until = None;
        self.hide_target_at = match mode {
            Mode::Memory => Some(Instant::now() + self.memory_hide),
            _ => None,
        };
    }

    fn update_playing(&mut self, input: &WinitInputHelper) {
        if input.key_pressed(VirtualKeyCode::Escape) {
            self.change_mode();
            return;
        }

        let session = match self.session.as_mut() {
            Some(s) => s,
            None => {
                self.screen = Screen::ModeSelect;
                return;
            }
        };
        let count = session.round.options.len();

        if input.key_pressed(VirtualKeyCode::Left) {
            self.cursor = (self.cursor + count - 1) % count;
        }
        if input.key_pressed(VirtualKeyCode::Right) {
            self.cursor = (self.cursor + 1) % count;
        }

        let mut picked = None;
        if input.key_pressed(VirtualKeyCode::Return) || input.key_pressed(VirtualKeyCode::Space) {
            picked = Some(self.cursor);
        }
        for (i, key) in SWATCH_KEYS.iter().take(count).enumerate() {
            if input.key_pressed(*key) {
                picked = Some(i);
            }
        }

        if let Some(i) = picked {
            let pick = session.round.options[i];
            let notice_before = session.notice;
            session.guess(pick, &mut self.rng, &mut self.high_scores);
            if session.notice != notice_before {
                self.notice_until = Some(Instant::now() + self.notice_len);
            }
        }

        let now = Instant::now();

        // the countdown runs at a steady 1 Hz regardless of frame rate
        while session.is_playing && now >= self.next_tick {
            session.tick(&mut self.high_scores);
            self.next_tick += Duration::from_secs(1);
        }

        // a new round invalidates any hide scheduled for the previous one
        if session.round_id != self.watched_round {
            self.watched_round = session.round_id;
            self.cursor = 0;
            self.hide_target_at = if session.mode == Mode::Memory && session.is_playing {
                Some(now + self.memory_hide)
            } else {
                None
            };
        }

        if let Some(at) = self.hide_target_at {
            if now >= at {
                session.target_visible = false;
                self.hide_target_at = None;
            }
        }

        if session.is_game_over {
            self.screen = Screen::GameOver;
            self.hide_target_at = None;
        }
    }

    fn update_game_over(&mut self, input: &WinitInputHelper) {
        if input.key_pressed(VirtualKeyCode::Return) {
            if let Some(mode) = self.session.as_ref().map(|s| s.mode) {
                self.select_mode(mode);
            }
        } else if input.key_pressed(VirtualKeyCode::Escape) {
            self.change_mode();
        }
    }

    fn change_mode(&mut self) {
        info!("back to mode select");
        self.session = None;
        self.screen = Screen::ModeSelect;
        self.cursor = 0;
        self.hide_target_at = None;
        self.notice_until = None;
    }

    /// Draw the `World` state to the frame buffer.
    pub fn draw(&self, frame: &mut [u8]) {
        World::clear(frame);
        match self.screen {
            Screen::ModeSelect => self.draw_mode_select(frame),
            Screen::Playing => {
                if let Some(session) = &self.session {
                    self.draw_playing(frame, session);
                }
            }
            Screen::GameOver => {
                if let Some(session) = &self.session {
                    self.draw_game_over(frame, session);
                }
            }
        }
    }

    fn clear(frame: &mut [u8]) {
        let w = WIDTH as usize;
        let line = repeat(BACKGROUND).take(w).flatten().collect::<Vec<_>>();
        for row in 0..HEIGHT as usize {
            frame[row * w * 4..(row + 1) * w * 4].copy_from_slice(&line);
        }
    }

    fn draw_mode_select(&self, frame: &mut [u8]) {
        self.draw_text(frame, "Hue Guess!", GREEN, 60.0, (230.0, 30.0));
        self.draw_text(
            frame,
            "match the color before the clock runs out",
            WHITE,
            24.0,
            (150.0, 100.0),
        );

        for (i, mode) in Mode::ALL.iter().enumerate() {
            let (x, y) = card_origin(i);
            World::fill_rect(frame, x, y, CARD_WIDTH, CARD_HEIGHT, PANEL);
            if i == self.cursor {
                World::outline_rect(frame, x, y, CARD_WIDTH, CARD_HEIGHT, HIGHLIGHT);
            }
            self.draw_text(
                frame,
                mode.name(),
                YELLOW,
                32.0,
                (x as f32 + 20.0, y as f32 + 6.0),
            );
            self.draw_text(
                frame,
                mode.description(),
                WHITE,
                20.0,
                (x as f32 + 20.0, y as f32 + 44.0),
            );
            let stats = format!(
                "{}s clock, {} swatches, best {}",
                mode.time_limit(),
                mode.option_count(),
                self.high_scores.get(*mode)
            );
            self.draw_text(frame, &stats, GRAY, 18.0, (x as f32 + 20.0, y as f32 + 72.0));
        }

        self.draw_text(
            frame,
            "up/down + enter, or 1-3",
            WHITE,
            20.0,
            (240.0, 540.0),
        );
    }

    fn draw_playing(&self, frame: &mut [u8], session: &Session) {
        let hud = format!(
            "score {}   streak {}   time {}",
            session.score, session.streak, session.time_left
        );
        self.draw_text(frame, session.mode.name(), YELLOW, 28.0, (40.0, 20.0));
        self.draw_text(frame, &hud, WHITE, 28.0, (40.0, 60.0));

        // the target swatch, or a "?" panel while Memory has it hidden
        let tx = (WIDTH as usize - TARGET_SIZE) / 2;
        if session.target_visible {
            World::fill_rect(
                frame,
                tx,
                TARGET_TOP,
                TARGET_SIZE,
                TARGET_SIZE,
                session.round.target.to_rgba(),
            );
            World::outline_rect(frame, tx, TARGET_TOP, TARGET_SIZE, TARGET_SIZE, GRAY);
        } else {
            World::fill_rect(frame, tx, TARGET_TOP, TARGET_SIZE, TARGET_SIZE, PANEL);
            self.draw_text(
                frame,
                "?",
                WHITE,
                80.0,
                (tx as f32 + 62.0, TARGET_TOP as f32 + 36.0),
            );
        }

        let count = session.round.options.len();
        for (i, option) in session.round.options.iter().enumerate() {
            let (x, y) = swatch_origin(count, i);
            World::fill_rect(frame, x, y, SWATCH_SIZE, SWATCH_SIZE, option.to_rgba());
            if i == self.cursor {
                World::outline_rect(frame, x, y, SWATCH_SIZE, SWATCH_SIZE, HIGHLIGHT);
            }
            self.draw_text(
                frame,
                &(i + 1).to_string(),
                WHITE,
                20.0,
                (x as f32 + SWATCH_SIZE as f32 / 2.0 - 5.0, y as f32 + SWATCH_SIZE as f32 + 8.0),
            );
        }

        self.draw_text(
            frame,
            "left/right + enter to guess, esc for menu",
            GRAY,
            20.0,
            (160.0, 500.0),
        );

        if let (Some(notice), Some(until)) = (session.notice, self.notice_until) {
            if Instant::now() < until {
                let toast = format!("{} {}", notice.title(), notice.blurb());
                self.draw_text(frame, &toast, FLAME, 28.0, (200.0, 540.0));
            }
        }
    }

    fn draw_game_over(&self, frame: &mut [u8], session: &Session) {
        self.draw_text(frame, "Game Over", FLAME, 60.0, (210.0, 100.0));

        let score = format!("score {}", session.score);
        self.draw_text(frame, &score, WHITE, 40.0, (270.0, 200.0));

        let streak = format!("best streak {}", session.best_streak);
        self.draw_text(frame, &streak, WHITE, 28.0, (270.0, 260.0));

        let best = self.high_scores.get(session.mode);
        let record = format!("{} best: {}", session.mode.name(), best);
        self.draw_text(frame, &record, GREEN, 28.0, (270.0, 300.0));
        if session.score >= best && session.score > 0 {
            self.draw_text(frame, "new high score!", YELLOW, 28.0, (270.0, 340.0));
        }

        self.draw_text(
            frame,
            "press enter to play again",
            WHITE,
            24.0,
            (230.0, 440.0),
        );
        self.draw_text(frame, "esc for mode select", WHITE, 24.0, (260.0, 480.0));
    }

    fn fill_rect(frame: &mut [u8], x: usize, y: usize, w: usize, h: usize, color: Color) {
        // one line _across_ the rect
        let line: Vec<u8> = repeat(color).take(w).flatten().collect();
        for row in y..y + h {
            let start = (row * WIDTH as usize + x) * 4;
            frame[start..start + w * 4].copy_from_slice(&line);
        }
    }

    fn outline_rect(frame: &mut [u8], x: usize, y: usize, w: usize, h: usize, color: Color) {
        World::fill_rect(frame, x, y, w, BORDER, color);
        World::fill_rect(frame, x, y + h - BORDER, w, BORDER, color);
        World::fill_rect(frame, x, y, BORDER, h, color);
        World::fill_rect(frame, x + w - BORDER, y, BORDER, h, color);
    }

    fn draw_text(&self, frame: &mut [u8], text: &str, color: Color, height: f32, offset: (f32, f32)) {
        let font = &self.font;
        let scale = Scale {
            x: height,
            y: height,
        };

        let v_metrics = font.v_metrics(scale);
        let offset = point(offset.0, offset.1 + v_metrics.ascent);

        let glyphs: Vec<_> = font.layout(text, scale, offset).collect();

        for glyph in glyphs {
            if let Some(bounding_box) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, v| {
                    // Offset the position by the glyph bounding box
                    let x_offset = x + bounding_box.min.x as u32;
                    let y_offset = y + bounding_box.min.y as u32;
                    if x_offset >= WIDTH || y_offset >= HEIGHT {
                        return;
                    }
                    let index: usize = ((y_offset * WIDTH + x_offset) * 4) as usize;
                    // blend the colors
                    let blended_color = [
                        (BACKGROUND[0] as f32 * (1.0 - v) + color[0] as f32 * v) as u8,
                        (BACKGROUND[1] as f32 * (1.0 - v) + color[1] as f32 * v) as u8,
                        (BACKGROUND[2] as f32 * (1.0 - v) + color[2] as f32 * v) as u8,
                        0xff,
                    ];
                    frame[index..index + 4].copy_from_slice(&blended_color);
                });
            }
        }
    }
}

fn card_origin(index: usize) -> (usize, usize) {
    (CARD_LEFT, CARDS_TOP + index * (CARD_HEIGHT + CARD_GAP))
}

fn swatch_origin(count: usize, index: usize) -> (usize, usize) {
    let row_width = count * SWATCH_SIZE + (count - 1) * SWATCH_GAP;
    let x0 = (WIDTH as usize - row_width) / 2;
    (x0 + index * (SWATCH_SIZE + SWATCH_GAP), SWATCH_TOP)
}

const FONT_FALLBACKS: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn load_font(config: &FontConfig) -> Result<Font<'static>, GameError> {
    if let Some(path) = &config.path {
        let data = fs::read(path).map_err(|source| GameError::FontRead {
            path: path.clone(),
            source,
        })?;
        return Font::try_from_vec(data).ok_or_else(|| GameError::FontParse { path: path.clone() });
    }
    for &candidate in FONT_FALLBACKS.iter() {
        if let Ok(data) = fs::read(candidate) {
            if let Some(font) = Font::try_from_vec(data) {
                info!(font = candidate, "using system font");
                return Ok(font);
            }
        }
    }
    Err(GameError::FontNotFound)
}
