/*!
# `while ... do ... end`

## Purpose
Loop while the condition is not zero.

## Remarks
The words between `while` and `do` run before every pass and must leave
exactly one number on the stack. The loop ends when that number is 0.

## Example
```text
3 while dup do dup pr 1 - end drop
321
```

*/
