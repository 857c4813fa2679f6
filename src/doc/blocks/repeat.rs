/*!
# `<count> repeat ... end`

## Purpose
Run the body a fixed number of times.

## Remarks
The count is truncated toward zero. Zero and negative counts skip the body.

## Example
```text
3 repeat "ho" pr end
hohoho
```

*/
