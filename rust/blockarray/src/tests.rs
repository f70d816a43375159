use std::cell::Cell;
use std::collections::VecDeque;

use blockarray_alloc::{BudgetAllocator, TrackingAllocator};

use crate::{Array, ArrayOptions, GrowthPolicy, array};

#[test]
fn test_mixed_operations() {
    let mut a = array![1, 2, 3];
    a.push_back(4).unwrap();
    assert_eq!(a, [1, 2, 3, 4]);
    assert_eq!(a.pop_front().unwrap(), 1);
    assert_eq!(a, [2, 3, 4]);
    assert_eq!(a.remove(1).unwrap(), 3);
    assert_eq!(a, [2, 4]);
    assert_eq!(a.find(&4), Some(1));
}

#[test]
fn test_preallocated_growth() {
    let tracker = TrackingAllocator::new();
    let mut a = Array::<u64, _>::new_in(&tracker);
    a.extend_by(3).unwrap();
    let before = tracker.allocations();
    a.push_back(1).unwrap();
    a.push_back(2).unwrap();
    a.push_back(3).unwrap();
    assert_eq!(tracker.allocations(), before);
    a.push_back(4).unwrap();
    assert_eq!(tracker.allocations(), before + 1);
    assert_eq!(a, [1, 2, 3, 4]);
}

#[test]
fn test_lifo_and_fifo_order() {
    let mut stack = Array::new();
    let mut queue = Array::new();
    for i in 0..16 {
        stack.push_back(i).unwrap();
        queue.push_back(i).unwrap();
    }
    for i in (0..16).rev() {
        assert_eq!(stack.pop_back().unwrap(), i);
    }
    for i in 0..16 {
        assert_eq!(queue.pop_front().unwrap(), i);
    }
    assert!(stack.is_empty() && queue.is_empty());
}

#[test]
fn test_copies_are_independent() {
    let mut a = Array::from_slice(&[String::from("a"), String::from("b")]).unwrap();
    let mut b = a.clone();
    a[0].push('!');
    b.push_back(String::from("c")).unwrap();
    assert_eq!(a, ["a!", "b"]);
    assert_eq!(b, ["a", "b", "c"]);

    let mut c = Array::new();
    c.assign_from(&a).unwrap();
    a.clear();
    assert_eq!(c, ["a!", "b"]);
}

#[test]
fn test_arrays_share_a_tracker() {
    let tracker = TrackingAllocator::new();
    {
        let mut a = Array::<u32, _>::new_in(&tracker);
        let mut b = Array::<u16, _>::new_in(&tracker);
        a.push_back(1).unwrap();
        b.push_back(2).unwrap();
        assert_eq!(tracker.live_blocks(), 2);
        assert_eq!(tracker.live_bytes(), 6);
        assert!(tracker.block_info(a.as_ptr().cast()).is_some());

        let moved = a.take();
        assert_eq!(tracker.live_blocks(), 2);
        drop(moved);
        assert_eq!(tracker.live_blocks(), 1);
    }
    let stats = tracker.stats();
    assert_eq!(stats.live_blocks, 0);
    assert_eq!(stats.allocations, stats.releases);
}

#[test]
fn test_budget_exhaustion_mid_sequence() {
    let budget = BudgetAllocator::new(256);
    let mut a = Array::with_options_in(
        ArrayOptions::new().with_growth(GrowthPolicy::Geometric { min: 2 }),
        &budget,
    )
    .unwrap();
    let mut pushed = 0u32;
    while a.push_back(pushed).is_ok() {
        pushed += 1;
    }
    assert_eq!(a.len(), pushed as usize);
    let expected: Vec<u32> = (0..pushed).collect();
    assert_eq!(a, expected);
    drop(a);
    assert_eq!(budget.used(), 0);
}

#[test]
fn test_iteration() {
    let mut a: Array<i32> = (1..=5).collect();
    for v in &mut a {
        *v *= 2;
    }
    let sum: i32 = a.iter().sum();
    assert_eq!(sum, 30);
    let owned: Vec<i32> = a.into_iter().rev().collect();
    assert_eq!(owned, vec![10, 8, 6, 4, 2]);
}

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

/// Tracks the number of live instances per thread.
#[derive(Debug, PartialEq)]
struct Live(u32);

impl Live {
    fn new(v: u32) -> Live {
        LIVE.with(|c| c.set(c.get() + 1));
        Live(v)
    }
}

impl Clone for Live {
    fn clone(&self) -> Self {
        Live::new(self.0)
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        LIVE.with(|c| c.set(c.get() - 1));
    }
}

fn live() -> isize {
    LIVE.with(|c| c.get())
}

#[test]
fn test_randomized_against_vec_deque() {
    fastrand::seed(7_316_452);
    let tracker = TrackingAllocator::new();
    {
        let mut a = Array::new_in(&tracker);
        let mut model = VecDeque::new();
        for _ in 0..2000 {
            match fastrand::u8(0..8) {
                0 | 1 => {
                    let v = fastrand::u32(..);
                    a.push_back(Live::new(v)).unwrap();
                    model.push_back(v);
                }
                2 => {
                    let v = fastrand::u32(..);
                    a.push_front(Live::new(v)).unwrap();
                    model.push_front(v);
                }
                3 => {
                    assert_eq!(a.pop_back().ok().map(|l| l.0), model.pop_back());
                }
                4 => {
                    assert_eq!(a.pop_front().ok().map(|l| l.0), model.pop_front());
                }
                5 if !model.is_empty() => {
                    let len = model.len() as isize;
                    let index = fastrand::isize(-len..len);
                    let resolved = (if index < 0 { len + index } else { index }) as usize;
                    assert_eq!(a.remove(index).unwrap().0, model.remove(resolved).unwrap());
                }
                6 => {
                    a.extend_by(fastrand::usize(0..4)).unwrap();
                }
                _ => {
                    if fastrand::u8(0..16) == 0 {
                        let copy = a.clone();
                        a.clear();
                        model.clear();
                        assert!(a.is_empty());
                        a.assign_from(&copy).unwrap();
                        model.extend(copy.iter().map(|l| l.0));
                    }
                }
            }
            assert_eq!(a.len(), model.len());
            assert!(a.len() <= a.capacity());
            assert_eq!(live(), a.len() as isize);
        }
        assert!(a.iter().map(|l| l.0).eq(model.iter().copied()));
    }
    assert_eq!(live(), 0);
    assert_eq!(tracker.live_blocks(), 0);
}
