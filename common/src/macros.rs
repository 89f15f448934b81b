/// Build a `PathBuf` from a list of components.
///
#[macro_export]
macro_rules! makepath {
    ($($item:expr),+) => {
        [
        $(std::path::PathBuf::from($item),)+
        ]
        .iter()
        .collect::<std::path::PathBuf>()
    };
}
