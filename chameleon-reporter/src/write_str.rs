// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-only output sinks.
//!
//! Reports are always valid UTF-8, and are written either to a buffered terminal stream or to an
//! in-memory `String`. [`WriteStr`] abstracts over both. It is similar to [`std::fmt::Write`], but
//! returns [`std::io::Error`] so that I/O failures on the terminal are not lost.

use std::{
    fmt,
    io::{self, BufWriter, Write},
};

/// A sink that accepts strings.
pub trait WriteStr {
    /// Writes a string to the sink.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Flushes any buffered output to its destination.
    fn write_str_flush(&mut self) -> io::Result<()>;

    /// Writes formatted output to the sink.
    ///
    /// This is what `write!` and `writeln!` call into.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match args.as_str() {
            // Static strings don't need an intermediate allocation.
            Some(s) => self.write_str(s),
            None => self.write_str(&args.to_string()),
        }
    }
}

impl WriteStr for String {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        fmt::Write::write_fmt(self, args).map_err(|_| io::Error::other("formatter error"))
    }
}

impl<W: Write> WriteStr for BufWriter<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<T: WriteStr + ?Sized> WriteStr for &mut T {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        (**self).write_str_flush()
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        (**self).write_fmt(args)
    }
}
