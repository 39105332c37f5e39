use crate::assets::{AssetTable, Backdrop};
use crate::game::{Game, Phase};
use crate::reward::RewardSink;
use crate::round::EndReason;
use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    fn dim(self) -> Rgb {
        let f = |v: u8| (v as u16 * 3 / 10) as u8;
        Rgb(f(self.0), f(self.1), f(self.2))
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(28, 24, 48);
const SKY_BOT: Rgb = Rgb(92, 64, 110);
const HILL_FAR: Rgb = Rgb(60, 52, 84);
const HILL_NEAR: Rgb = Rgb(44, 38, 64);
const BRICK: Rgb = Rgb(139, 0, 0);
const BRICK_DARK: Rgb = Rgb(100, 0, 0);
const MORTAR: Rgb = Rgb(70, 20, 20);
const CAN: Rgb = Rgb(74, 74, 74);
const CAN_SHINE: Rgb = Rgb(96, 96, 96);
const CAN_RIM: Rgb = Rgb(50, 50, 50);
const BODY: Rgb = Rgb(245, 170, 66);
const BODY_HI: Rgb = Rgb(255, 205, 110);
const WING: Rgb = Rgb(215, 135, 35);
const EYE: Rgb = Rgb(255, 255, 255);
const PUPIL: Rgb = Rgb(20, 20, 20);
const NOSE: Rgb = Rgb(235, 110, 130);
const GOLD: Rgb = Rgb(255, 215, 0);
const PROMO_BG: Rgb = Rgb(200, 30, 120);
const BOARD_POST: Rgb = Rgb(36, 30, 50);
const PANEL: Rgb = Rgb(40, 36, 60);
const PANEL_EDGE: Rgb = Rgb(120, 100, 160);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Blends `c` over the rectangle; `t_256` of 256 is fully opaque.
    fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb, t_256: u16) {
        for py in y.max(0)..(y + h).min(self.h as i32) {
            for px in x.max(0)..(x + w).min(self.w as i32) {
                let under = self.get(px as usize, py as usize);
                self.set(px, py, Rgb::lerp(under, c, t_256));
            }
        }
    }

    fn darken(&mut self) {
        for c in &mut self.px {
            *c = c.dim();
        }
    }

    /// Queues the whole buffer; the caller flushes.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.term()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.term()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.term()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb, shadow: bool) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                if shadow {
                    buf.set(px + 1, py + 1, SHADOW);
                }
                buf.set(px, py, fg);
            }
        }
    }
}

/// Draws `n` centered on `cx`, 3px per digit with 1px spacing.
fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb, shadow: bool) {
    let s = n.to_string();
    let total_w = s.len() as i32 * 4 - 1;
    let start_x = cx - total_w / 2;
    for (i, ch) in s.bytes().enumerate() {
        draw_digit(buf, start_x + i as i32 * 4, y, ch - b'0', fg, shadow);
    }
}

// ── Text labels ─────────────────────────────────────────────────────────────

/// Plain terminal text printed on top of the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
    pub bg: Rgb,
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Draws the playfield scaled to the terminal. The game owns every pixel.
pub struct Renderer {
    buf: PixelBuf,
    labels: Vec<Label>,
    frame: u64,
    warned_empty: bool,
}

impl Renderer {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            labels: Vec::new(),
            frame: 0,
            warned_empty: false,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
        self.warned_empty = false;
    }

    pub fn buf(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn has_surface(&mut self) -> bool {
        if self.buf.w == 0 || self.buf.h < 2 {
            if !self.warned_empty {
                log::warn!("no drawing surface ({}x{}), skipping frames", self.buf.w, self.buf.h);
                self.warned_empty = true;
            }
            return false;
        }
        true
    }

    pub fn draw<S: RewardSink>(&mut self, game: &Game<S>, assets: &AssetTable) {
        self.labels.clear();
        if !self.has_surface() {
            return;
        }
        self.frame += 1;
        let view = View::new(&self.buf, game.config().width, game.config().height);

        self.draw_sky();
        if assets.is_ready() {
            if let Some(backdrop) = assets.backdrop() {
                self.draw_hills(&view, backdrop, game.scroll_x());
                self.draw_billboards(&view, backdrop, game);
            }
        }
        self.draw_obstacles(&view, game);
        self.draw_flapper(&view, game);
        self.draw_promo(&view, game);
        self.draw_hud(game);

        match game.phase() {
            Phase::Playing => self.draw_reward_hint(&view, game),
            Phase::Ready => self.draw_title(),
            Phase::Over(_) => self.draw_summary(game),
        }
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        if self.buf.w == 0 || self.buf.h < 2 {
            return Ok(());
        }
        self.buf.render(out)?;
        for label in &self.labels {
            queue!(
                out,
                cursor::MoveTo(label.col, label.row),
                style::SetForegroundColor(label.fg.term()),
                style::SetBackgroundColor(label.bg.term()),
                style::Print(&label.text),
            )?;
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }

    fn label_centered(&mut self, row: i32, text: String, fg: Rgb, bg: Rgb) {
        let rows = (self.buf.h / 2) as i32;
        if row < 0 || row >= rows {
            return;
        }
        let len = text.chars().count() as i32;
        let col = ((self.buf.w as i32 - len) / 2).max(0);
        self.labels.push(Label {
            col: col as u16,
            row: row as u16,
            text,
            fg,
            bg,
        });
    }

    fn label_at(&mut self, col: i32, row: i32, text: String, fg: Rgb, bg: Rgb) {
        let rows = (self.buf.h / 2) as i32;
        if row < 0 || row >= rows || col < 0 || col >= self.buf.w as i32 {
            return;
        }
        self.labels.push(Label {
            col: col as u16,
            row: row as u16,
            text,
            fg,
            bg,
        });
    }

    fn draw_sky(&mut self) {
        let h = self.buf.h;
        for y in 0..h {
            let t = ((y * 256) / h.max(1)) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            for x in 0..self.buf.w {
                self.buf.set(x as i32, y as i32, c);
            }
        }
    }

    fn draw_hills(&mut self, view: &View, backdrop: &Backdrop, scroll_x: f64) {
        let base = self.buf.h as i32;
        for (layer, parallax, color) in [
            (&backdrop.far, 0.2, HILL_FAR),
            (&backdrop.near, 0.5, HILL_NEAR),
        ] {
            for x in 0..self.buf.w as i32 {
                let lx = x as f64 / view.sx + scroll_x * parallax;
                let top = base - (Backdrop::sample(layer, lx) * view.sy) as i32;
                for y in top..base {
                    self.buf.set(x, y, color);
                }
            }
        }
    }

    /// Promo boards on posts, scrolling with the near hills. The text is
    /// only printed while playing and while no wall stands in front.
    fn draw_billboards<S: RewardSink>(&mut self, view: &View, backdrop: &Backdrop, game: &Game<S>) {
        let cfg = game.config();
        for (x, board) in backdrop.billboards_in_view(game.scroll_x(), cfg.width) {
            let bx = view.x(x);
            let by = view.y(board.y);
            let bw = view.len_x(board.w).max(1);
            let bh = view.len_y(board.h).max(2);
            let post_w = view.len_x(8.0).max(1);
            let base = self.buf.h as i32;
            for px in [bx + bw / 4, bx + bw * 3 / 4 - post_w] {
                self.buf.fill_rect(px, by + bh, post_w, base - by - bh, BOARD_POST);
            }
            self.buf.blend_rect(bx, by, bw, bh, PROMO_BG, 110);

            let whole = x >= 0.0 && x + board.w <= cfg.width;
            let blocked = game
                .obstacles()
                .any(|o| o.x < x + board.w && o.right_edge(cfg) > x);
            if game.phase() != Phase::Playing || !whole || blocked {
                continue;
            }
            let len = board.text.chars().count() as i32;
            let under = self.buf.get(
                ((bx + bw / 2).max(0) as usize).min(self.buf.w - 1),
                ((by + bh / 2).max(0) as usize).min(self.buf.h - 1),
            );
            self.label_at(bx + (bw - len) / 2, (by + bh / 2) / 2, board.text.to_string(), WHITE, under);
        }
    }

    fn draw_obstacles<S: RewardSink>(&mut self, view: &View, game: &Game<S>) {
        let cfg = game.config();
        let ow = view.len_x(cfg.obstacle_width).max(1);
        let shine_x = view.len_x(5.0);
        let shine_w = view.len_x(10.0).max(1);
        let brick_h = view.len_y(20.0).max(2);
        let brick_w = (ow / 2).max(2);

        for o in game.obstacles() {
            let x = view.x(o.x);
            let gap_top = view.y(o.gap_top);
            let gap_bot = view.y(o.gap_bottom);

            // Top wall: brick courses, offset every other row
            for y in 0..gap_top {
                let course = y / brick_h;
                let offset = if course % 2 == 0 { 0 } else { brick_w / 2 };
                for dx in 0..ow {
                    let mortar = y % brick_h == brick_h - 1 || (dx + offset) % brick_w == 0;
                    let c = if mortar {
                        MORTAR
                    } else if dx < ow / 4 {
                        BRICK_DARK
                    } else {
                        BRICK
                    };
                    self.buf.set(x + dx, y, c);
                }
            }

            // Bottom: trash can with a rim and a metallic stripe
            let bottom = self.buf.h as i32;
            self.buf.fill_rect(x, gap_bot, ow, bottom - gap_bot, CAN);
            self.buf.fill_rect(x + shine_x, gap_bot, shine_w, bottom - gap_bot, CAN_SHINE);
            self.buf.fill_rect(x - 1, gap_bot, ow + 2, 1, CAN_RIM);
        }
    }

    fn draw_flapper<S: RewardSink>(&mut self, view: &View, game: &Game<S>) {
        let cfg = game.config();
        let player = game.player();
        let x = view.x(cfg.player_x);
        let y = view.y(player.y);
        let w = view.len_x(cfg.player_width).max(3);
        let h = view.len_y(cfg.player_height).max(2);

        let tilt = (player.vy / 6.0).clamp(-1.0, 1.0) as i32;

        // Body and highlight
        self.buf.fill_rect(x, y, w, h, BODY);
        self.buf.fill_rect(x + 1, y, (w - 2).max(1), 1, BODY_HI);

        // Ears
        self.buf.set(x + w - 1, y - 1, BODY);
        self.buf.set(x + w * 2 / 3, y - 1, BODY);

        // Wing beats every four frames while playing
        let beat = if game.phase() == Phase::Playing && self.frame % 8 < 4 { -1 } else { 1 };
        let wing_w = (w / 3).max(1);
        let wing_h = (h / 3).max(1);
        self.buf.fill_rect(x + w / 6, y + h / 2 + beat + tilt, wing_w, wing_h, WING);

        // Eye and nose
        let ex = x + w * 3 / 4;
        let ey = y + h / 4;
        self.buf.fill_rect(ex - 1, ey, 2, 2_i32.min(h), EYE);
        self.buf.set(ex, ey + 1_i32.min(h - 1), PUPIL);
        self.buf.set(x + w, y + h / 2 + tilt, NOSE);

        // Tail
        self.buf.fill_rect(x - (w / 5).max(1), y + h / 3 + tilt, (w / 5).max(1), 1, WING);
    }

    fn draw_promo<S: RewardSink>(&mut self, view: &View, game: &Game<S>) {
        let Some((promo, opacity)) = game.promo().visible() else {
            return;
        };
        let cfg = game.config();
        let w = view.len_x(cfg.width * 0.5);
        let h = view.len_y(100.0).max(2);
        let x = (self.buf.w as i32 - w) / 2;
        let y = view.y(150.0);
        let t = (opacity.clamp(0.0, 1.0) * 256.0) as u16;
        self.buf.blend_rect(x, y, w, h, PROMO_BG, t);
        if opacity >= 0.6 {
            let under = self.buf.get(
                (self.buf.w / 2).min(self.buf.w - 1),
                ((y + h / 2).max(0) as usize).min(self.buf.h - 1),
            );
            self.label_centered((y + h / 2) / 2, promo.text.to_string(), WHITE, under);
        }
    }

    fn draw_hud<S: RewardSink>(&mut self, game: &Game<S>) {
        let cx = self.buf.w as i32 / 2;
        draw_number(&mut self.buf, cx, 2, game.round().score, WHITE, true);

        let bg = self.buf.get(0, 0);
        let lines = [
            format!("Obstacles: {}", game.round().score),
            format!("Game $FLAPS: {}", game.round().earned),
            format!("Total $FLAPS: {}", game.display_total()),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            self.label_at(1, i as i32, text, WHITE, bg);
        }
    }

    /// "+N $FLAPS" next to the flapper while it is about to clear an obstacle.
    fn draw_reward_hint<S: RewardSink>(&mut self, view: &View, game: &Game<S>) {
        let cfg = game.config();
        let lead = cfg.player_x + cfg.player_width;
        let near = game.obstacles().any(|o| {
            !o.passed && (lead - o.right_edge(cfg)).abs() < 20.0
        });
        if near {
            let col = view.x(lead + 10.0);
            let row = view.y(game.player().y - 20.0) / 2;
            let bg = self.buf.get(0, 0);
            self.label_at(
                col,
                row,
                format!("+{} $FLAPS", cfg.reward_per_obstacle),
                GOLD,
                bg,
            );
        }
    }

    fn draw_title(&mut self) {
        self.buf.darken();
        let mid = (self.buf.h / 4) as i32;
        let bg = self.buf.get(0, 0);
        self.label_centered(mid - 1, "Click or Press Space to Start".into(), WHITE, bg);
        self.label_centered(mid + 1, "Avoid the walls and collect $FLAPS!".into(), GOLD, bg);
    }

    fn draw_summary<S: RewardSink>(&mut self, game: &Game<S>) {
        let Phase::Over(summary) = game.phase() else {
            return;
        };
        self.buf.darken();

        let cx = self.buf.w as i32 / 2;
        let cy = self.buf.h as i32 / 2;
        let panel_w = 44_i32.min(self.buf.w as i32 - 2);
        let panel_h = 22_i32.min(self.buf.h as i32 - 2);
        let px = cx - panel_w / 2;
        let py = cy - panel_h / 2;
        self.buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, PANEL_EDGE);
        self.buf.fill_rect(px, py, panel_w, panel_h, PANEL);

        let row = py / 2 + 1;
        let headline = match summary.reason {
            EndReason::Collision => "Game Over!",
            EndReason::OutOfBounds => "Game Over! Out of bounds",
        };
        let lines = [
            (headline.to_string(), WHITE),
            (format!("Obstacles Passed: {}", summary.score), WHITE),
            (format!("Game $FLAPS Earned: {}", summary.earned), GOLD),
            (format!("Total $FLAPS: {}", summary.total), GOLD),
            (String::new(), WHITE),
            ("Click or Press Space to Play Again".to_string(), WHITE),
        ];
        for (i, (text, fg)) in lines.into_iter().enumerate() {
            if !text.is_empty() {
                self.label_centered(row + i as i32, text, fg, PANEL);
            }
        }
        // flat on the panel, no drop shadow
        draw_number(&mut self.buf, cx, py + panel_h - 7, summary.score, GOLD, false);
    }
}

/// Maps playfield units onto buffer pixels.
struct View {
    sx: f64,
    sy: f64,
}

impl View {
    fn new(buf: &PixelBuf, width: f64, height: f64) -> Self {
        Self {
            sx: buf.w as f64 / width,
            sy: buf.h as f64 / height,
        }
    }

    fn x(&self, x: f64) -> i32 {
        (x * self.sx).floor() as i32
    }

    fn y(&self, y: f64) -> i32 {
        (y * self.sy).floor() as i32
    }

    fn len_x(&self, w: f64) -> i32 {
        (w * self.sx).round() as i32
    }

    fn len_y(&self, h: f64) -> i32 {
        (h * self.sy).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::reward::{FlapsLedger, MemoryStore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game<FlapsLedger<MemoryStore>> {
        Game::new(GameConfig::default(), FlapsLedger::open(MemoryStore::new()))
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb(0, 100, 200);
        let b = Rgb(200, 100, 0);
        assert_eq!(Rgb::lerp(a, b, 0), a);
        assert_eq!(Rgb::lerp(a, b, 256), b);
        assert_eq!(Rgb::lerp(a, b, 128), Rgb(100, 100, 100));
    }

    #[test]
    fn empty_surface_is_skipped() {
        let mut renderer = Renderer::new(0, 0);
        renderer.draw(&game(), &AssetTable::empty());
        assert!(renderer.labels().is_empty());

        let mut out = Vec::new();
        renderer.present(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn title_screen_before_first_round() {
        let mut renderer = Renderer::new(100, 40);
        renderer.draw(&game(), &AssetTable::empty());
        assert!(renderer.labels().iter().any(|l| l.text.contains("Press Space to Start")));
        assert!(renderer.labels().iter().any(|l| l.text == "Total $FLAPS: 0"));
    }

    #[test]
    fn summary_shows_zero_score() {
        let mut g = game();
        let mut rng = StdRng::seed_from_u64(3);
        g.activate(0.0, &mut rng);
        g.end_round(EndReason::OutOfBounds);

        let mut renderer = Renderer::new(100, 40);
        renderer.draw(&g, &AssetTable::empty());
        let texts: Vec<&str> = renderer.labels().iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"Obstacles Passed: 0"));
        assert!(texts.contains(&"Game $FLAPS Earned: 0"));
        assert!(texts.iter().any(|t| t.contains("Play Again")));
    }

    #[test]
    fn obstacles_paint_walls() {
        let mut g = game();
        let mut rng = StdRng::seed_from_u64(3);
        g.activate(0.0, &mut rng);
        g.tick(0.0, &mut rng);

        let mut renderer = Renderer::new(80, 30);
        renderer.draw(&g, &AssetTable::empty());
        // the first obstacle spawns at the right edge, just off the buffer
        let buf = renderer.buf();
        assert_eq!(buf.get(buf.width() - 1, 0), Rgb::lerp(SKY_TOP, SKY_BOT, 0));

        // a flap every 30 frames keeps the flapper airborne
        for i in 1..=200 {
            let t = i as f64 * 16.0;
            if i % 30 == 0 {
                g.activate(t, &mut rng);
            }
            g.tick(t, &mut rng);
        }
        assert_eq!(g.phase(), Phase::Playing);
        renderer.draw(&g, &AssetTable::empty());
        let buf = renderer.buf();
        let x = (g.obstacles().next().unwrap().x * buf.width() as f64 / 800.0) as usize + 4;
        let top = buf.get(x, 0);
        assert!(top == BRICK || top == BRICK_DARK || top == MORTAR);
    }

    fn ready_assets() -> AssetTable {
        use crate::assets::{ALL_ASSETS, Asset, AssetKey};
        let mut table = AssetTable::empty();
        for key in ALL_ASSETS {
            let asset = match key {
                AssetKey::Sound(_) => Asset::Sound(vec![0.0; 8]),
                AssetKey::Backdrop => Asset::Backdrop(Backdrop::generate()),
            };
            table.insert(key, asset);
        }
        table
    }

    #[test]
    fn billboard_text_shows_once_assets_are_in() {
        let mut g = game();
        let mut rng = StdRng::seed_from_u64(3);
        g.activate(0.0, &mut rng);
        g.tick(0.0, &mut rng);

        let mut renderer = Renderer::new(100, 40);
        renderer.draw(&g, &AssetTable::empty());
        assert!(!renderer.labels().iter().any(|l| l.text == "FLAP FOR WL"));

        renderer.draw(&g, &ready_assets());
        let board = renderer.labels().iter().find(|l| l.text == "FLAP FOR WL").unwrap();
        // the board spans the right half of the view, in its upper half
        assert!(board.row < 20);
        assert!(board.col >= 50);
        assert!(board.col as usize + board.text.len() <= 100);
    }

    #[test]
    fn shadow_is_optional() {
        let mut buf = PixelBuf::new(20, 10);
        buf.fill_rect(0, 0, 20, 10, PANEL);
        draw_number(&mut buf, 10, 2, 80, GOLD, false);
        let has = |buf: &PixelBuf, c: Rgb| (0..20).any(|x| (0..10).any(|y| buf.get(x, y) == c));
        assert!(has(&buf, GOLD));
        assert!(!has(&buf, SHADOW));

        draw_number(&mut buf, 10, 2, 80, GOLD, true);
        assert!(has(&buf, SHADOW));
    }

    #[test]
    fn summary_panel_shows_score_in_gold() {
        let mut g = game();
        let mut rng = StdRng::seed_from_u64(3);
        g.activate(0.0, &mut rng);
        g.end_round(EndReason::Collision);

        let mut renderer = Renderer::new(100, 40);
        renderer.draw(&g, &AssetTable::empty());
        let buf = renderer.buf();
        let gold = (0..buf.width()).any(|x| (0..buf.height()).any(|y| buf.get(x, y) == GOLD));
        assert!(gold);
    }
}
