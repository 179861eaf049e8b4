/*!
# Introductory Tutorial for mind

Start the executable from a terminal. It reads `boot.mind` from the
directory it lives in, then waits at a prompt. Type CTRL-D or `bye` to
leave. Stop a running word with CTRL-C.

<pre><code>&nbsp;> 3 4 + .
&nbsp;7
</code></pre>

Every word is separated by whitespace. Numbers are pushed on the stack,
words consume and produce stack items. `.` prints the top of the stack and
`cr` starts a new line. Words are case sensitive.

## Defining words

A colon starts a new definition, a semicolon ends it. In between, words
are compiled instead of executed.

<pre><code>&nbsp;> : square dup * ;
&nbsp;> 7 square .
&nbsp;49
</code></pre>

A new definition of an existing name hides the old one. Words compiled
before the redefinition keep calling the old one.

Some words are *immediate*: they run even in the middle of a definition.
Comments work that way. `\` skips to the end of the line and `( ... )`
skips to the closing parenthesis, so both can be used inside definitions
and cost nothing at run time. Mark your own word immediate with
`immediate` right after its definition.

## Variables and constants

<pre><code>&nbsp;> variable count
&nbsp;> 42 count !
&nbsp;> count @ .
&nbsp;42
&nbsp;> 10 constant ten
&nbsp;> ten ten * .
&nbsp;100
</code></pre>

`constant` is written in mind itself with `does>`. Every constant shares
the code after `does>`; each one passes its own data to it.

## Control structures

`if ... else ... then`, `begin ... until`, `begin ... again` and
`begin ... while ... repeat` are only available inside definitions.

<pre><code>&nbsp;> : countdown begin dup . 1- dup 0= until drop ;
&nbsp;> 3 countdown
&nbsp;3 2 1
</code></pre>

## Files

`include file.mind` reads another source file. A relative name is looked
up next to the file that includes it.

Run a command and exit with `mind -e '...'`. Use `-x` instead to get the
prompt afterwards. Arguments after the options are available to programs
through `argc` and `argv`.

## Errors

An unknown word prints its line number and name, then everything is
reset: both stacks are emptied, compilation stops and the rest of the
input line or file is skipped.

<pre><code>&nbsp;> 1 2 frobnicate 3
&nbsp;l0: not found: frobnicate
</code></pre>

Stack overflow and underflow, bad addresses and division by zero are
reported the same way. Set `MIND_UNCHECKED` in the environment to run
without stack checks. Memory accesses outside the machine are still
caught.

*/
