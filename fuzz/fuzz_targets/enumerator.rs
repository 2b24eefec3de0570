#![no_main]

use libfuzzer_sys::fuzz_target;
use profenum::{ObjectEnum, ObjectId, Outcome};

// First byte sizes the snapshot, every following pair is one operation and its argument.
// The enumerator is checked against a plain index after each step.
fuzz_target!(|data: &[u8]| {
    let Some((&size, ops)) = data.split_first() else {
        return;
    };

    let elements: Vec<ObjectId> = (0..usize::from(size)).map(ObjectId).collect();
    let Ok(mut e) = ObjectEnum::new(&elements) else {
        return;
    };
    let mut position = 0usize;
    let mut buffer = [ObjectId::default(); 256];

    for op in ops.chunks_exact(2) {
        let arg = u32::from(op[1]);
        match op[0] % 5 {
            0 => {
                let mut fetched = 0;
                let outcome = e
                    .next_into(arg, Some(&mut buffer[..]), Some(&mut fetched))
                    .unwrap();
                let take = (arg as usize).min(elements.len() - position);
                assert_eq!(fetched as usize, take);
                assert_eq!(&buffer[..take], &elements[position..position + take]);
                assert_eq!(outcome == Outcome::Complete, take == arg as usize);
                position += take;
            }
            1 => {
                let outcome = e.skip(arg);
                let take = (arg as usize).min(elements.len() - position);
                assert_eq!(outcome == Outcome::Complete, take == arg as usize);
                position += take;
            }
            2 => {
                e.reset();
                position = 0;
            }
            3 => {
                let clone = e.try_clone().unwrap();
                assert_eq!(clone.remaining() as usize, elements.len());
                if arg % 2 == 0 {
                    e = clone;
                    position = 0;
                }
            }
            _ => {
                let extra = e.add_ref();
                assert!(extra.is_same(&e));
                assert_eq!(extra.release(), 1);
            }
        }

        let mut count = 0;
        e.get_count(Some(&mut count)).unwrap();
        assert_eq!(count as usize, elements.len() - position);
    }
});
