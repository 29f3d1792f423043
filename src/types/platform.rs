/// Platform family used to pick a link dispatch strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Desktop,
    OtherMobile,
}
