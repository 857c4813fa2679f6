/*!
# `fn <name> <inputs>... : <outputs>... do ... end`

## Purpose
Define a function with a declared stack effect.

## Remarks
Type names are `number` (`num`, `n`), `string` (`str`, `s`), `ptr`
(`pointer`, `p`) and `any` (`a`). Inputs and outputs are listed deepest
first. The body starts with the inputs on an otherwise empty stack and must
leave exactly the outputs. A function is known from the point where it is
defined, including inside its own body.

## Example
```text
fn fact n : n do dup 1 > if dup 1 - fact * end end
5 fact pr
120
```

*/
