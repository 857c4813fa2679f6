/*!
# `var <name> ... end`

## Purpose
A mutable cell for the length of the block.

## Remarks
`var` allocates one heap slot and binds the name to a pointer to it. Write
the cell with `memsave` and read it with `memload`. The slot is freed at
`end`.

## Example
```text
var total
    0 total memsave
    5 repeat total memload 2 + total memsave end
    total memload pr
end
10
```

*/
