/*!
# Blocks

Every block begins with a keyword and ends with `end`. Blocks nest freely.
A block either leaves the stack as it found it, or, in the case of
`if ... else ... end`, leaves the same depth on both paths.
*/

#[path = "blocks/if.rs"]
#[allow(non_snake_case)]
pub mod IF;

#[path = "blocks/repeat.rs"]
#[allow(non_snake_case)]
pub mod REPEAT;

#[path = "blocks/while.rs"]
#[allow(non_snake_case)]
pub mod WHILE;

#[path = "blocks/let.rs"]
#[allow(non_snake_case)]
pub mod LET;

#[path = "blocks/var.rs"]
#[allow(non_snake_case)]
pub mod VAR;

#[path = "blocks/fn.rs"]
#[allow(non_snake_case)]
pub mod FN;

#[path = "blocks/import.rs"]
#[allow(non_snake_case)]
pub mod IMPORT;
