/*!
# `import <name>`

## Purpose
Bring in the functions of a standard library module.

## Remarks
The name is looked up in the standard library directory as `<name>` and
then `<name>.tape`. Relative names such as `./util` are not implemented.
By default the module is spliced into the program where the `import`
appears. With `--lazy-imports` the module is checked and run on its own
when execution reaches the `import`, and only its functions are kept.

## Example
```text
import math
0 3 - abs pr
3
```

*/
