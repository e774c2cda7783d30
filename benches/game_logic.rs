use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{is_collision, is_locked, Field, FieldConfig, GameState};
use blockfall::engine::{Session, SessionConfig};
use blockfall::types::{Action, EMPTY};

fn running_state() -> GameState {
    GameState::new(FieldConfig::default(), 12345).reduce(&Action::Start)
}

fn bench_reduce_down(c: &mut Criterion) {
    let state = running_state();

    c.bench_function("reduce_down", |b| {
        b.iter(|| black_box(state.reduce(black_box(&Action::Down))))
    });
}

fn bench_reduce_rotate(c: &mut Criterion) {
    let state = running_state();

    c.bench_function("reduce_rotate", |b| {
        b.iter(|| black_box(state.reduce(black_box(&Action::Rotate))))
    });
}

fn bench_collision(c: &mut Criterion) {
    let state = running_state();

    c.bench_function("collision_and_lock", |b| {
        b.iter(|| {
            let field = black_box(state.field());
            let piece = black_box(state.piece());
            black_box(is_collision(field, piece) || is_locked(field, piece))
        })
    });
}

fn bench_remove_rows(c: &mut Criterion) {
    let mut full = Field::new(10, 20);
    for y in 16..20 {
        for x in 0..10 {
            full.set(x, y, 1);
        }
    }

    c.bench_function("remove_4_rows", |b| {
        b.iter(|| {
            let mut field = full.clone();
            let rows = field.removable_rows();
            field.remove_rows(&rows);
            black_box(field.get(0, 19) == Some(EMPTY))
        })
    });
}

fn bench_session_second(c: &mut Criterion) {
    c.bench_function("session_one_second", |b| {
        b.iter(|| {
            let mut session = Session::new(SessionConfig::default());
            session.dispatch(Action::Start);
            session.advance(black_box(1_000), &mut ());
            black_box(session.processed())
        })
    });
}

criterion_group!(
    benches,
    bench_reduce_down,
    bench_reduce_rotate,
    bench_collision,
    bench_remove_rows,
    bench_session_second
);
criterion_main!(benches);
