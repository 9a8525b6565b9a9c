/// **(internal)** Explicitly test different logical identities and probability properties.
mod _test_pra_logic_basic;

/// **(internal)** Generate pseudo-random expression trees, minimize them and exhaustively
/// verify that the cut sets and their probability match the tree.
mod _test_pra_logic_fuzzing;
