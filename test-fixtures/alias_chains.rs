//! Alias chains resolve to the terminal root; each alias flags on its own.

fn chain_resolves_to_root() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let mut c = b;
    a.push(1);
    c.push(2); //~ diverge: c <- a
}

fn sibling_aliases_each_flag() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let mut c = a;
    b.push(1); //~ diverge: b <- a
    c.push(2); //~ diverge: c <- a
}
