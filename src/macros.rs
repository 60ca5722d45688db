#[cfg(all(feature = "semihosting", debug_assertions, not(test)))]
macro_rules! debug_println {
    ($($arg:tt)*) => ({
        use cortex_m_semihosting::hprintln;
        hprintln!($($arg)*).ok();
    });
}

#[cfg(not(all(feature = "semihosting", debug_assertions, not(test))))]
macro_rules! debug_println {
    ($($arg:tt)*) => {{}};
}
