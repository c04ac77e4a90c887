/// Side effect requested by one dispatch of the link machine. The caller
/// performs it after the transition has been applied.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LinkAction {
    None,
    RequestReconnect,
}
