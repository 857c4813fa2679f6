/*!
# `let <name>... do ... end`

## Purpose
Pop values into names for the length of the block.

## Remarks
Names are bound in the order written, so the last name takes the top of
the stack. A name shadows any outer binding with the same name and
disappears at `end`.

## Example
```text
10 4 let a b do a b - pr end
6
```

*/
