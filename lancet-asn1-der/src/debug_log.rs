#[cfg(not(feature = "debug_log"))]
macro_rules! debug_log {
    () => {};
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug_log")]
macro_rules! debug_log {
    () => {
        println!("| asn1 |");
    };
    ($($arg:tt)*) => {
        print!("| asn1 => ");
        println!($($arg)*);
    };
}
