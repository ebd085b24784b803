use arcade_shooter::entities::Actor;
use arcade_shooter::pool::{Pool, SlotId};

fn actor(y: f32) -> Actor {
    Actor { x: 0.0, y, vy: 0.0 }
}

#[test]
fn new_pool_is_empty() {
    let pool: Pool<Actor> = Pool::with_capacity(4);
    assert_eq!(pool.capacity(), 4);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.iter().count(), 0);
}

#[test]
fn acquire_hands_out_lowest_free_slot() {
    let mut pool = Pool::with_capacity(3);
    assert_eq!(pool.acquire(actor(1.0)), Some(SlotId(0)));
    assert_eq!(pool.acquire(actor(2.0)), Some(SlotId(1)));
    assert!(pool.destroy(SlotId(0)));
    // Destroyed slot is reused before the untouched one
    assert_eq!(pool.acquire(actor(3.0)), Some(SlotId(0)));
    assert_eq!(pool.get(SlotId(0)), Some(&actor(3.0)));
}

#[test]
fn full_pool_refuses_new_actors() {
    let mut pool = Pool::with_capacity(2);
    pool.acquire(actor(1.0));
    pool.acquire(actor(2.0));
    assert_eq!(pool.acquire(actor(3.0)), None);
    assert_eq!(pool.active_count(), 2);
}

#[test]
fn zero_capacity_pool_never_acquires() {
    let mut pool: Pool<Actor> = Pool::with_capacity(0);
    assert_eq!(pool.acquire(actor(1.0)), None);
}

#[test]
fn destroyed_slot_is_invisible() {
    let mut pool = Pool::with_capacity(2);
    let id = pool.acquire(actor(1.0)).unwrap();
    assert!(pool.destroy(id));
    assert!(!pool.destroy(id)); // second destroy is a no-op
    assert!(!pool.is_active(id));
    assert_eq!(pool.get(id), None);
}

#[test]
fn out_of_range_ids_are_inactive() {
    let mut pool: Pool<Actor> = Pool::with_capacity(1);
    assert!(!pool.is_active(SlotId(5)));
    assert_eq!(pool.get(SlotId(5)), None);
    assert!(!pool.destroy(SlotId(5)));
}

#[test]
fn iter_yields_active_in_slot_order() {
    let mut pool = Pool::with_capacity(4);
    for y in [1.0, 2.0, 3.0, 4.0] {
        pool.acquire(actor(y));
    }
    pool.destroy(SlotId(1));
    let ys: Vec<(SlotId, f32)> = pool.iter().map(|(id, a)| (id, a.y)).collect();
    assert_eq!(ys, vec![(SlotId(0), 1.0), (SlotId(2), 3.0), (SlotId(3), 4.0)]);
}

#[test]
fn iter_mut_updates_in_place() {
    let mut pool = Pool::with_capacity(2);
    pool.acquire(actor(1.0));
    for (_, a) in pool.iter_mut() {
        a.y += 10.0;
    }
    assert_eq!(pool.get(SlotId(0)).map(|a| a.y), Some(11.0));
}

#[test]
fn destroy_where_counts_removed() {
    let mut pool = Pool::with_capacity(4);
    for y in [-20.0, 5.0, -11.0, 100.0] {
        pool.acquire(actor(y));
    }
    assert_eq!(pool.destroy_where(|a| a.y < -10.0), 2);
    assert_eq!(pool.active_count(), 2);
}
