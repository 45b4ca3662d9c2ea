use nnptr::{upcast, NotNull, Shared};

trait A {}

struct B;

impl A for B {}

upcast!(B => dyn A);

pub fn main() {
    env_logger::init();

    // Easy to create by handing over a box
    let p1 = Shared::from_box(Box::new(9));

    // Copies share ownership of the object
    let p3 = p1.clone();
    println!("{}", p3);

    let p4 = *p1 + *p3;
    println!("i32: {}", p4);

    // Values are packed into a fresh allocation
    let p5 = Shared::new(*p1 + p4);
    println!("{}", p5);

    let p_str = Shared::from_box(Box::new(String::from("hello world!")));
    println!("{}", Shared::unwrap_or_clone(p_str));

    let nnsptr_1 = NotNull::new(Some(std::sync::Arc::new(vec![1; 10])));
    println!("v[0] = {}", nnsptr_1[0]);

    let nnsptr_3 = Shared::new(vec![1; 10]);
    println!("v[0] = {}", nnsptr_3[0]);

    // Should print '123'
    let vshared = vec![Shared::new(1), Shared::new(2), Shared::new(3)];
    println!("{}{}{}", vshared[0], vshared[1], vshared[2]);

    let b = Shared::new(B);
    let b2 = b.clone();
    let a: Shared<dyn A> = b2.upcast();
    println!("{} owners of {:p}", Shared::strong_count(&b), a);
}
