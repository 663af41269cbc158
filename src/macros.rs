macro_rules! auto_increment {
    () => {{
        use std::sync::atomic::{AtomicU32, Ordering};

        static COUNTER: AtomicU32 = AtomicU32::new(1);
        // Skip zero on wraparound so the id stays non-zero.
        loop {
            if let Some(id) = std::num::NonZeroU32::new(COUNTER.fetch_add(1, Ordering::Relaxed)) {
                break id;
            }
        }
    }};
}

pub(crate) use auto_increment;
