//! Aliases of freshly-empty vectors: growth through the alias flags,
//! growth through the root never does.

fn basic_uninitialized_aliasing() {
    let mut a: Vec<i32>;
    let mut b = a;
    a.push(1);
    b.push(2); //~ diverge: b <- a
}

fn empty_literal_aliasing() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1); //~ diverge: b <- a
    a.push(2);
}

fn vec_new_aliasing() {
    let mut a = Vec::new();
    let mut b = a;
    b.push(1); //~ diverge: b <- a
    a.push(2);
}

fn zero_length_repeat_aliasing() {
    let mut a = vec![0; 0];
    let mut b = a;
    b.push(1); //~ diverge: b <- a
}

fn extend_is_a_growth_operation() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.extend([1, 2, 3]); //~ diverge: b <- a
}
