use crate::lane::predecessor_successor::PredecessorSuccessor;

/// Links a lane to the corresponding lane on the preceding and succeeding
/// road. Connecting-road lanes use this to name the outgoing-road lane they
/// continue into.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLink {
    pub predecessor: Option<PredecessorSuccessor>,
    pub successor: Option<PredecessorSuccessor>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for LaneLink
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut predecessor = None;
        let mut successor = None;

        read_children!(
            read,
            "predecessor" => PredecessorSuccessor => |v| predecessor = Some(v),
            "successor" => PredecessorSuccessor => |v| successor = Some(v),
        );

        Ok(Self {
            predecessor,
            successor,
        })
    }
}
