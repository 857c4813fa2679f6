/*!
# Builtin Words

Effects are written `inputs -- outputs` with the top of the stack on the
right.

## Arithmetic
| word | effect | |
|---|---|---|
| `+ - * /` | `n n -- n` | `/` fails on division by zero |
| `^` | `n n -- n` | power |
| `sqrt` | `n -- n` | fails on negative numbers |
| `floor ceil` | `n -- n` | |
| `round` | `n -- n` | halves round away from zero |
| `is-integer` | `n -- n` | 1 when there is no fraction |

Numbers are decimal with 28 significant digits. A result that does not fit
is an overflow error.

## Comparison and logic
| word | effect | |
|---|---|---|
| `== !=` | `a a -- n` | values of different types are never equal |
| `> >= < <=` | `n n -- n` | |
| `&& \|\|` | `n n -- n` | a number is true when greater than 0 |
| `lnot` | `n -- n` | 1 when the number is less than 1 |

## Stack
| word | effect |
|---|---|
| `dup` | `a -- a a` |
| `swap` | `a b -- b a` |
| `drop` | `a --` |

## Strings and conversion
| word | effect | |
|---|---|---|
| `str+` | `s s -- s` | concatenate |
| `str2num` | `s -- n` | surrounding whitespace is ignored |
| `num2str` | `n -- s` | |
| `str2countstr` | `s -- p n` | one character per heap slot, then the count |

## Input and output
| word | effect | |
|---|---|---|
| `pr` | `a --` | print without a newline |
| `ipn` | `a -- n` | print the prompt, read a number |
| `ips` | `a -- s` | print the prompt, read a line |
| `???` | `--` | print the types on the stack, deepest first |

At the end of input `ipn` reads 0 and `ips` reads an empty string.

## Memory
| word | effect | |
|---|---|---|
| `memalloc` | `n -- p` | allocate that many slots |
| `memfree` | `p --` | free an allocation by its first slot |
| `memsave` | `a p --` | store a value |
| `memload` | `p -- a` | load a value |
| `ptr+` | `p n -- p` | move a pointer |

The heap holds 300000 slots unless `--heap` says otherwise. Anything still
allocated when the program ends is reported as a leak.

*/
