/*!
# Errors

Every error stops the program. The first line names the error, the second
gives the file, line and column, and the rest shows the source.

| error | raised when |
|---|---|
| `unterminated string` | a string has no closing quote |
| `invalid escape` | a backslash is followed by something other than `n r t b " \ xHH` |
| `unmatched end` | `end` has no open block |
| `unterminated block` | a block has no `end`, or a `while` has no `do` |
| `misplaced keyword` | `else`, `do` or `:` where it cannot go |
| `malformed function` | a `fn` signature is incomplete |
| `malformed binding` | `let` or `var` is not followed by names |
| `missing import` | a module cannot be found |
| `not implemented` | an import names a relative path |
| `import cycle` | a module imports itself |
| `stack imbalance` | branches or loop conditions disagree on the stack depth |
| `signature violation` | a function body does not leave its declared outputs |
| `unknown type` | a `fn` signature names a type that does not exist |
| `non-empty stack` | the program ends with values on the stack |
| `stack underflow` | a word needs more values than there are |
| `type mismatch` | a word gets a value of the wrong type |
| `undefined name` | a word is neither a function nor a binding |
| `out of memory` | no free heap region is large enough |
| `invalid pointer` | a pointer is outside every allocation |
| `invalid allocation` | an allocation of zero or a negative size |
| `uninitialized memory` | a slot is read before it is written |
| `division by zero` | |
| `overflow` | a number does not fit, or the stack is too deep |
| `invalid number` | a string is not a number, or `sqrt` of a negative |
| `break` | the program was interrupted with CTRL-C |

*/
