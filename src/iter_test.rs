use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;
use crate::{Natural, RbTree};

fn reference<'a>(node: Option<NodeRef<'a, u32>>, order: Order, acc: &mut Vec<u32>) {
    if let Some(node) = node {
        if order == Order::PreOrder {
            acc.push(*node.value());
        }
        reference(node.left(), order, acc);
        if order == Order::InOrder {
            acc.push(*node.value());
        }
        reference(node.right(), order, acc);
        if order == Order::PostOrder {
            acc.push(*node.value());
        }
    }
}

fn values<'a>(iter: Traverse<'a, u32>) -> Vec<u32> {
    iter.map(|node| *node.value()).collect()
}

#[test]
fn test_traverse_orders() {
    let seed: u64 = random();
    println!("test_traverse_orders {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u32> = RbTree::new(Natural);
    for _i in 0..500 {
        index.insert(rng.gen::<u32>() % 1000).unwrap();
    }

    for order in [Order::InOrder, Order::PreOrder, Order::PostOrder].iter() {
        let mut refs = vec![];
        reference(index.root(), *order, &mut refs);
        assert_eq!(values(index.traverse(*order)), refs, "{:?}", order);
        assert_eq!(refs.len(), index.len());
    }

    let mut sorted: Vec<u32> = index.iter().copied().collect();
    assert!(sorted.windows(2).all(|w| w[0] < w[1]));
    sorted.dedup();
    assert_eq!(sorted.len(), index.len());
}

#[test]
fn test_traverse_small() {
    let mut index: RbTree<u32> = RbTree::new(Natural);
    for value in [40, 20, 60, 10, 30, 50, 70].iter() {
        index.insert(*value).unwrap();
    }
    assert_eq!(*index.root().unwrap().value(), 40);

    assert_eq!(
        values(index.traverse(Order::InOrder)),
        vec![10, 20, 30, 40, 50, 60, 70]
    );
    assert_eq!(
        values(index.traverse(Order::PreOrder)),
        vec![40, 20, 10, 30, 60, 50, 70]
    );
    assert_eq!(
        values(index.traverse(Order::PostOrder)),
        vec![10, 30, 20, 50, 70, 60, 40]
    );

    let left = index.root().unwrap().left().unwrap();
    assert_eq!(values(left.traverse(Order::InOrder)), vec![10, 20, 30]);
    assert_eq!(values(left.traverse(Order::PreOrder)), vec![20, 10, 30]);
    assert_eq!(values(left.traverse(Order::PostOrder)), vec![10, 30, 20]);
}

#[test]
fn test_traverse_empty() {
    let index: RbTree<u32> = RbTree::new(Natural);
    assert_eq!(index.traverse(Order::InOrder).count(), 0);
    assert_eq!(index.traverse(Order::PreOrder).count(), 0);
    assert_eq!(index.traverse(Order::PostOrder).count(), 0);
    assert_eq!(index.iter().next(), None);
}

#[test]
fn test_traverse_independent() {
    let mut index: RbTree<u32> = RbTree::new(Natural);
    for value in 0..100 {
        index.insert(value).unwrap();
    }

    // interleave two traversals, each keeps its own position.
    let (mut a, mut b) = (index.iter(), index.iter());
    let mut items = vec![];
    for _i in 0..50 {
        items.push((*a.next().unwrap(), *b.next().unwrap()));
        b.next().unwrap();
    }
    assert!(items.iter().enumerate().all(|(i, (x, y))| *x == i as u32 && *y == 2 * i as u32));
    assert_eq!(b.next(), None);
    assert_eq!(a.count(), 50);

    // fresh call restarts the sequence.
    assert_eq!(index.iter().next(), Some(&0));
    let items: Vec<&u32> = (&index).into_iter().collect();
    assert_eq!(items.len(), 100);
}
