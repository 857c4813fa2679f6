/*!
# `<number> if ... [else ...] end`

## Purpose
Run the consequent when the number is at least 1.

## Remarks
Without `else` the consequent must not change the depth of the stack.
With `else` both branches must leave the same depth.

## Example
```text
7 2 > if "big" else "small" end pr
big
```

*/
