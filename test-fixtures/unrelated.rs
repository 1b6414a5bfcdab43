//! Cases the analysis must stay silent on.

fn single_vector_never_flags() {
    let mut a = Vec::new();
    a.push(1);
    a.push(2);
}

fn strings_are_not_vectors() {
    let mut s = String::new();
    let mut t = s;
    t.push('x');
}

fn nonempty_literal_is_unclassified() {
    let mut a = vec![1, 2, 3];
    let mut b: Vec<i32> = a;
    b.push(4);
}

fn same_names_as_other_fixtures() {
    let mut a = Vec::with_capacity(10);
    let mut b = a;
    b.push(1);
}
