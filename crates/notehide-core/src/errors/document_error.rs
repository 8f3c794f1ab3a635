/// Host document errors.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("node {index} (generation {generation}) is no longer in the document")]
    StaleHandle { index: u32, generation: u32 },

    #[error("node {index} is not an element")]
    NotAnElement { index: u32 },

    #[error("the document root cannot be removed")]
    RootRemoval,

    #[error("cannot attach node {child} under its own descendant {parent}")]
    CyclicAttach { parent: u32, child: u32 },
}
