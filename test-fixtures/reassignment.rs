//! Later writes overwrite earlier state, per name.

fn reassignment_breaks_the_hazard() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1); //~ diverge: b <- a
    a.push(2);

    a = vec![42];
    a.push(99);
}

fn shadowing_overwrites_by_name() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let a = Vec::with_capacity(8);
    b.push(1);
}
