use std::hint::black_box;

use criterion::{Criterion, Throughput};
use heapless::String;
use libmenu::console::labels::{render_into, Arg, StaticLabels, Vt100};
use libmenu::console::{Console, Error};
use libmenu::menu::input::classify_choice;
use libmenu::menu::{Engine, Menu, MenuId, MenuItem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Console that replays a byte pattern forever and discards all output.
struct PatternConsole {
    pattern: &'static [u8],
    pos: usize,
}

impl PatternConsole {
    fn new(pattern: &'static [u8]) -> Self {
        Self { pattern, pos: 0 }
    }
}

impl Console for PatternConsole {
    fn ready_read(&mut self) -> bool {
        !self.pattern.is_empty()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if self.pattern.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.pattern[self.pos];
        self.pos = (self.pos + 1) % self.pattern.len();
        Ok(1)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn peek(&mut self, offset: usize) -> Option<u8> {
        if self.pattern.is_empty() {
            None
        } else {
            Some(self.pattern[(self.pos + offset) % self.pattern.len()])
        }
    }
}

static LABELS: StaticLabels = StaticLabels(&[
    (10, "Main"),
    (11, "Settings"),
    (20, "Settings page"),
    (21, "Back to main"),
]);

const MAIN: MenuId = MenuId(1);
const SETTINGS: MenuId = MenuId(2);

static MAIN_ITEMS: &[MenuItem] = &[
    MenuItem {
        label: 10,
        target: Some(SETTINGS),
        page: None,
    },
    MenuItem {
        label: 11,
        target: Some(SETTINGS),
        page: None,
    },
];

static SETTINGS_ITEMS: &[MenuItem] = &[
    MenuItem {
        label: 20,
        target: Some(MAIN),
        page: None,
    },
    MenuItem {
        label: 21,
        target: Some(MAIN),
        page: None,
    },
];

static MENUS: &[Menu] = &[
    Menu {
        id: MAIN,
        items: MAIN_ITEMS,
    },
    Menu {
        id: SETTINGS,
        items: SETTINGS_ITEMS,
    },
];

fn booted(pattern: &'static [u8]) -> Engine<PatternConsole, Vt100<&'static StaticLabels>> {
    let mut engine = Engine::new(PatternConsole::new(pattern), Vt100::new(&LABELS), MENUS, MAIN);
    for _ in 0..8 {
        engine.process().expect("bootstrap tick failed");
    }
    engine
}

pub fn bench_classify_choice(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let bytes: Vec<u8> = (0..4096).map(|_| rng.gen()).collect();

    let mut group = c.benchmark_group("input");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("classify_choice", |b| {
        b.iter(|| {
            for &byte in &bytes {
                black_box(classify_choice(black_box(byte)));
            }
        })
    });
    group.finish();
}

pub fn bench_idle_tick(c: &mut Criterion) {
    let mut engine = booted(b"");
    c.bench_function("engine/idle_tick", |b| {
        b.iter(|| engine.process().expect("tick failed"))
    });
}

pub fn bench_navigation_tick(c: &mut Criterion) {
    // Every tick consumes a selector and triggers a full page redraw.
    let mut engine = booted(b"1");
    c.bench_function("engine/navigation_tick", |b| {
        b.iter(|| engine.process().expect("tick failed"))
    });
}

pub fn bench_render_label(c: &mut Criterion) {
    c.bench_function("labels/render_into", |b| {
        b.iter(|| {
            let mut out: String<64> = String::new();
            render_into(
                &mut out,
                black_box("CPU %d%% mem %d/%d kB (%s)"),
                &[
                    Arg::Int(42),
                    Arg::Int(96),
                    Arg::Int(128),
                    Arg::Str("steady"),
                ],
            );
            black_box(out.len())
        })
    });
}
