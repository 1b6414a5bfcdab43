//! Constructors that reserve headroom: safe to grow through any alias.

fn with_capacity_is_safe() {
    let mut a: Vec<i32> = Vec::with_capacity(100);
    let mut b = a;
    a.push(1);
    b.push(2);
}

fn nonzero_repeat_is_safe() {
    let mut a = vec![0u8; 64];
    let mut b = a;
    b.push(1);
}

fn zero_capacity_reservation_flags() {
    let mut a: Vec<i32> = Vec::with_capacity(0);
    let mut b = a;
    b.push(1); //~ diverge: b <- a
}

fn dynamic_capacity_is_unclassified(n: usize) {
    let mut a: Vec<i32> = Vec::with_capacity(n);
    let mut b = a;
    b.push(1);
}
