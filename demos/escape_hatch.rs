use nnptr::{NotNull, CHECKED};

struct TestClass;

pub fn main() {
    env_logger::init();

    let mut some_unique = NotNull::new(Some(Box::new(TestClass)));
    println!("{:p}", &*some_unique);

    // Releasing the box behind the wrapper's back leaks it and leaves `None`
    let _ = Box::leak(unsafe { some_unique.as_inner_mut() }.take().expect("Already empty"));

    if CHECKED {
        // Terminates here
        println!("{}", some_unique.as_inner().is_some());
    } else {
        println!("unchecked build, not touching the wrapper again");
    }
}
