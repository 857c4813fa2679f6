/*!
# Introductory Tutorial for Tape

Tape programs are plain text files. Words are separated by whitespace and
are run from left to right against one stack of values. Save the following
as `hello.tape` and run it with `tape hello.tape`.

```text
"Hello World\n" pr
```

Numbers push themselves, strings push themselves, and every other word is
either a function or a binding. `pr` pops one value and prints it without
a newline.

```text
3 4 + pr
```

This prints `7`. The `+` word pops two numbers and pushes their sum. When
an operation is not commutative, the deeper value is the left operand, so
`10 4 -` is `6`.

Before anything runs, the whole program is checked. Every word has a stack
effect, and the checker makes sure the stack is used consistently on every
path and is empty when the program ends. A program that leaves a value
behind is rejected before it prints anything.

<pre><code>&nbsp;$ tape leftover.tape
&nbsp;error: non-empty stack; program ends with number left on the stack
&nbsp;at: leftover.tape:1:7
&nbsp;| 1 2 + 3
</code></pre>

Blocks are opened by a keyword and closed by `end`. Here is a loop that
counts to ten.

```text
1
while dup 10 <= do
    dup pr " " pr
    1 +
end
drop
```

Functions declare their stack effect: the types they take and the types
they leave.

```text
fn square n : n do dup * end
9 square pr
```

Read the chapters for every block and every builtin word.

*/
