use crate::*;
pub use random::*;

mod random;

/// Strategy for laying mines out on a board described by a [`GameConfig`].
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
