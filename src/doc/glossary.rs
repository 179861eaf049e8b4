/*!
# Glossary

Stack effects are written `( before -- after )` with the top of the stack
on the right. A flag is -1 for true and 0 for false. `"name"` means the
word reads the next token from the input.

## Starting and ending

| Word | Effect | |
|---|---|---|
| `abort` | ( -- ) | Empty both stacks, close all input, run `abort?`. |
| `quit` | ( -- ) | Empty the return stack and restart the interpreter. |
| `bye` | ( -- ) | Leave mind. |
| `abort?` | ( -- ) | Deferred. Exits by default; the prompt points it at `quit`. |

## Execution

| Word | Effect | |
|---|---|---|
| `noop` | ( -- ) | Nothing. |
| `;;` | ( -- ) | Return from the current word. |
| `0;` | ( 0 -- \| n -- n ) | Drop and return if the top is 0. |
| `execute` | ( xt -- ) | Run the word. |
| `^docol` `^dodefer` `^dovar` `^dodoes` | ( -- code ) | Executor codes for `entry`. |
| `branch` `0branch` `lit` | ( -- ) | Compiled with an inline cell. |

## Interpreter and compiler

| Word | Effect | |
|---|---|---|
| `interpret` | ( -- ) | Read one token, compile or execute it. |
| `word?` | ( -- ) | Deferred. Called with an unknown token at `here`. |
| `notfound` | ( -- ) | Report the token at `here` and abort. |
| `(')` | ( "name" -- xt \| 0 ) | Look up the next token. |
| `'` | ( "name" -- xt ) | Same as `(')`. |
| `(find)` | ( a n -- xt -1 \| 0 ) | Look up a string. |
| `parse` | ( "name" -- a ) | Next token as a counted string at `here`. |
| `(number)` | ( a -- n -1 \| 0 ) | Convert a counted string. `$` for hex. |
| `[` `]` | ( -- ) | Stop and start compiling. `[` is immediate. |
| `:` `;` | ( "name" -- ) | Define a word. |
| `immediate` | ( -- ) | Mark the newest word immediate. |
| `create` | ( "name" -- ) | Word that pushes its body address. |
| `entry` | ( code "name" -- ) | Word with the given executor. |
| `does>` | ( -- ) | Give the newest word the code that follows. |
| `[']` `literal` | ( -- ) | Compile an execution token or a number. |
| `\` `(` | ( -- ) | Comments. Both also end at a page break. |
| `,"` | ( "text" -- ) | Compile a counted string up to `"`. |
| `.(` | ( "text" -- ) | Print text up to `)`. |

## Dictionary

`align` `allot` `,` `c,` `entry,` ( a code -- ) `link>` ( lfa -- xt )
`flags@` `flags!` `>name` `>doer` `>body` `#immediate` `words`.

## System variables

`s0` `r0` `latest` `dp` `state` push addresses. `here` pushes the value of
`dp`. `line#` is the current line of input and `page#` the current page;
a form feed starts a new page at line 0. `argc` and `argv` describe
the arguments after the options; `argv` is an array of counted strings.

## Stacks

`drop` `nip` `2drop` `?dup` `dup` `over` `under` `swap` `rot` `-rot`
`sp@` `depth` on the parameter stack, `>r` `r>` `r` `rdrop` on the return
stack.

## Arithmetic

`0` `1` `-1` `2` `1+` `1-` `-` `+` `*` `/` `u*` `or` `and` `=` `0=` `0<`
`u<` `u>` `not` `<>` `negate`. Arithmetic wraps around; `/` by zero is an
error.

## Memory and output

`@` `c@` `!` `c!` `cells` `cell+` `cell-` `count`, and `emit` `type`
`puts` `cr` `h.` `.` `space`. `blank` ( -- c ) pushes a space character.

## Input

`forward` moves past the current character, `current` ( -- c \| -1 )
reads it, `eos` tests for the end. `include` ( "file" -- ) reads another
file.

## Defined in boot.mind

`if` `else` `then` `begin` `again` `until` `while` `repeat` `variable`
`constant` `defer` `is`.

*/
